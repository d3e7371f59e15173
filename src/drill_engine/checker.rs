//! Grades a free-text answer against a card's canonical expression.
//!
//! Two expressions are equivalent when they agree, within [`TOLERANCE`], at
//! every one of the [`SAMPLE_POINTS`]. Five points separate any two distinct
//! polynomials of degree four or less, which covers every answer this drill
//! can expect.
//!
//! Grading never fails: blank, unparseable, or non-finite answers come back
//! as a wrong [`Verdict`] and are logged at `warn`.

use log::warn;

use crate::drill_engine::{
    expression::{parse_expression, Expr},
    models::{EquivalenceStrategy, Verdict},
    normalize::normalize_answer,
    symbolic::check_symbolic,
};

pub const SAMPLE_POINTS: [f64; 5] = [0.0, 1.0, -1.0, 2.5, -3.0];
pub const TOLERANCE: f64 = 1e-6;

/// `true` when `user_input` denotes the same function of `x` as `canonical`.
pub fn is_equivalent(user_input: &str, canonical: &str) -> bool {
    check_answer(user_input, canonical).is_correct()
}

/// Numeric-sampling grade with the reason for a wrong answer.
pub fn check_answer(user_input: &str, canonical: &str) -> Verdict {
    match parse_pair(user_input, canonical) {
        Ok((user, expected)) => compare_at_samples(&user, &expected),
        Err(verdict) => verdict,
    }
}

/// Grade with an explicit strategy.
pub fn check_with(strategy: EquivalenceStrategy, user_input: &str, canonical: &str) -> Verdict {
    match strategy {
        EquivalenceStrategy::Numeric => check_answer(user_input, canonical),
        EquivalenceStrategy::Symbolic => check_symbolic(user_input, canonical),
    }
}

/// Normalize and parse both sides. A blank answer short-circuits before any
/// parsing.
pub(crate) fn parse_pair(user_input: &str, canonical: &str) -> Result<(Expr, Expr), Verdict> {
    let user_text = normalize_answer(user_input);
    if user_text.is_empty() {
        return Err(Verdict::Blank);
    }
    let canonical_text = normalize_answer(canonical);

    let parsed = parse_expression(&user_text)
        .and_then(|user| parse_expression(&canonical_text).map(|expected| (user, expected)));
    parsed.map_err(|err| {
        warn!("could not parse answer {user_input:?} against {canonical:?}: {err}");
        Verdict::Malformed { reason: err.to_string() }
    })
}

pub(crate) fn compare_at_samples(user: &Expr, expected: &Expr) -> Verdict {
    for x in SAMPLE_POINTS {
        let (actual, wanted) = match (user.eval(x), expected.eval(x)) {
            (Ok(actual), Ok(wanted)) => (actual, wanted),
            (Err(err), _) | (_, Err(err)) => {
                warn!("evaluation failed at x = {x}: {err}");
                return Verdict::Malformed { reason: err.to_string() };
            }
        };
        if (actual - wanted).abs() > TOLERANCE {
            return Verdict::Mismatch { x, expected: wanted, actual };
        }
    }
    Verdict::Correct
}
