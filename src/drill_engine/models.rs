use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::drill_engine::error::ConfigError;

/// Number of cards in a practice set unless configured otherwise.
pub const DEFAULT_SET_SIZE: usize = 10;

/// `canonical_answer` of a card whose expansion failed. Evaluates fine, so a
/// stray grading call never crashes, but no learner answer is expected to match.
pub const ERROR_CANONICAL: &str = "0";
/// `display_answer` of a card whose expansion failed.
pub const ERROR_DISPLAY: &str = "ERROR";

// ---------------------------------------------------------------------------
// Problem primitives
// ---------------------------------------------------------------------------

/// A factored linear problem `coefficient*(x + offset) + constant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearProblem {
    pub coefficient: i32,
    pub offset: i32,
    pub constant: i32,
}

impl LinearProblem {
    pub fn new(coefficient: i32, offset: i32, constant: i32) -> Self {
        LinearProblem { coefficient, offset, constant }
    }

    /// Inner term of the factored form: `"x + 4"`, `"x - 2"` or `"x"`.
    pub fn inner_term(&self) -> String {
        match self.offset {
            0 => "x".to_string(),
            k if k > 0 => format!("x + {k}"),
            k => format!("x - {}", k.unsigned_abs()),
        }
    }

    /// Closed-form expansion `a*(x + k) + c = a*x + (a*k + c)`.
    ///
    /// Returns `None` only on integer overflow.
    pub fn expand(&self) -> Option<LinearForm> {
        let intercept = self
            .coefficient
            .checked_mul(self.offset)?
            .checked_add(self.constant)?;
        Some(LinearForm { slope: self.coefficient, intercept })
    }
}

/// Renders the question text, e.g. `3*(x + 4) + (-1)`.
impl fmt::Display for LinearProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner_term();
        if self.coefficient == 1 {
            write!(f, "({inner})")?;
        } else {
            write!(f, "{}*({inner})", self.coefficient)?;
        }
        match self.constant {
            0 => Ok(()),
            c if c < 0 => write!(f, " + ({c})"),
            c => write!(f, " + {c}"),
        }
    }
}

/// Expanded form `slope*x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinearForm {
    pub slope: i32,
    pub intercept: i32,
}

impl LinearForm {
    /// Evaluator-friendly form used for grading, e.g. `2*x + -3`.
    pub fn canonical(&self) -> String {
        format!("{}*x + {}", self.slope, self.intercept)
    }
}

/// Renders the answer-key form, e.g. `4x + 11`, `x`, `2x - 3`.
impl fmt::Display for LinearForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.intercept;
        match self.slope {
            0 => return write!(f, "{b}"),
            1 => write!(f, "x")?,
            -1 => write!(f, "-x")?,
            a => write!(f, "{a}x")?,
        }
        if b > 0 {
            write!(f, " + {b}")
        } else if b < 0 {
            write!(f, " - {}", b.unsigned_abs())
        } else {
            Ok(())
        }
    }
}

/// Range the inner offset `k` is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OffsetRange {
    /// `k` in `[1, 5]`; every question has a `+ k` inner term.
    Positive,
    /// `k` in `[-4, 4]`; questions may read `x - 3` or a bare `x`.
    #[default]
    Signed,
}

impl OffsetRange {
    pub fn bounds(self) -> RangeInclusive<i32> {
        match self {
            OffsetRange::Positive => 1..=5,
            OffsetRange::Signed => -4..=4,
        }
    }
}

impl fmt::Display for OffsetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetRange::Positive => write!(f, "Positive [1, 5]"),
            OffsetRange::Signed => write!(f, "Signed [-4, 4]"),
        }
    }
}

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

/// One generated practice problem. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub card_id: String,
    pub problem: LinearProblem,
    /// Factored form shown to the learner.
    pub question: String,
    /// Parseable expanded form used for grading.
    pub canonical_answer: String,
    /// Human form shown in the answer key only.
    pub display_answer: String,
}

impl Flashcard {
    /// Sentinel card for a problem whose expansion failed.
    pub fn error(card_id: String, problem: LinearProblem) -> Self {
        Flashcard {
            card_id,
            problem,
            question: problem.to_string(),
            canonical_answer: ERROR_CANONICAL.to_string(),
            display_answer: ERROR_DISPLAY.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.display_answer == ERROR_DISPLAY
    }
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EquivalenceStrategy {
    /// Evaluate both sides at fixed sample points.
    #[default]
    Numeric,
    /// Compare exact polynomial normal forms, falling back to `Numeric`
    /// when either side is not a polynomial.
    Symbolic,
}

impl fmt::Display for EquivalenceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalenceStrategy::Numeric => write!(f, "numeric"),
            EquivalenceStrategy::Symbolic => write!(f, "symbolic"),
        }
    }
}

/// Outcome of grading one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    /// Nothing left after normalization.
    Blank,
    /// Unparseable, unknown variable, or not finite at a sample point.
    Malformed { reason: String },
    /// Parsed fine but denotes a different function.
    Mismatch { x: f64, expected: f64, actual: f64 },
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }

    pub fn mark(&self) -> &'static str {
        if self.is_correct() { "✓" } else { "✗" }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::Blank => write!(f, "no answer"),
            Verdict::Malformed { reason } => write!(f, "could not read answer ({reason})"),
            Verdict::Mismatch { x, expected, actual } => {
                write!(f, "at x = {x} expected {expected}, got {actual}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// How a practice set is generated and graded.
///
/// Every field has a default, so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    pub set_size: usize,
    pub offset_range: OffsetRange,
    /// `Some` makes the set reproducible; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    pub strategy: EquivalenceStrategy,
}

impl Default for DrillConfig {
    fn default() -> Self {
        DrillConfig {
            set_size: DEFAULT_SET_SIZE,
            offset_range: OffsetRange::default(),
            rng_seed: None,
            strategy: EquivalenceStrategy::default(),
        }
    }
}

impl DrillConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_offset_range(mut self, offset_range: OffsetRange) -> Self {
        self.offset_range = offset_range;
        self
    }

    pub fn with_strategy(mut self, strategy: EquivalenceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_set_size(mut self, set_size: usize) -> Self {
        self.set_size = set_size;
        self
    }

    /// Parse and validate a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: DrillConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.set_size == 0 {
            return Err(ConfigError::EmptySet);
        }
        Ok(())
    }
}
