//! # algebra_drill_gen
//!
//! An offline, deterministic generator and grader for algebra flashcards.
//!
//! Each card asks the learner to simplify a factored linear expression such as
//! `3*(x + 4) + (-1)`. Answers are free text and are graded by *equivalence*,
//! not string comparison: `4x+11`, `11 + 4x` and `4(x + 2) + 3` are all
//! accepted for `4x + 11`.
//!
//! ## How it works
//!
//! 1. Build a [`DrillConfig`] (set size, offset range, optional RNG seed,
//!    grading strategy), or load one with [`DrillConfig::from_json`].
//! 2. Call [`generate_set`], or [`PracticeSession::start`] to get a session
//!    that also tracks the cursor, answers, and the answer-key flag.
//! 3. Grade with [`is_equivalent`] / [`check_answer`], or let the session do it
//!    via [`PracticeSession::answer_key`] and [`PracticeSession::score`].
//! 4. Hand [`to_answer_key_json`] to whatever renders the key.
//!
//! ## Grading
//!
//! The default strategy evaluates both expressions at `x = 0, 1, -1, 2.5, -3`
//! and accepts when every pair agrees within `1e-6`. The symbolic strategy
//! compares exact polynomial normal forms instead and falls back to sampling
//! for answers that are not polynomials. Blank or unreadable answers are
//! simply wrong; grading never fails.
//!
//! ## Quick start
//!
//! ```rust
//! use algebra_drill_gen::{is_equivalent, DrillConfig, PracticeSession};
//!
//! let mut session = PracticeSession::start(&DrillConfig::new().with_seed(42)).unwrap();
//! let card = session.current_card().clone();
//! println!("Simplify: {}", card.question);
//!
//! session.record_answer(card.display_answer.replace(' ', ""));
//! session.reveal();
//! assert!(session.answer_key()[0].verdict.is_correct());
//!
//! assert!(is_equivalent("11 + 4x", "4*x + 11"));
//! assert!(!is_equivalent("not an expression", "4*x + 11"));
//! ```

pub mod drill_engine;

// Convenience re-exports so callers can use `algebra_drill_gen::generate_set`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    check_answer, check_with, generate_flashcard, generate_set, generate_set_with,
    is_equivalent, to_answer_key_json, ConfigError, DrillConfig, EquivalenceStrategy,
    EvalError, Flashcard, KeyEntry, LinearForm, LinearProblem, OffsetRange, ParseError,
    PracticeSession, Score, SymbolicError, Verdict,
};

#[cfg(test)]
mod tests;
