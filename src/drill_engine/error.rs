//! Error types for parsing, evaluation, symbolic expansion and configuration.
//!
//! None of these ever reach the learner: the checker folds parse and
//! evaluation failures into a wrong-answer [`Verdict`](super::models::Verdict).

use thiserror::Error;

/// The answer text could not be turned into an expression tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,
    #[error("syntax error near `{0}`")]
    Syntax(String),
    #[error("unconsumed input: `{0}`")]
    UnconsumedInput(String),
    #[error("number out of range: `{0}`")]
    InvalidNumber(String),
    #[error("brackets, signs or powers nested more than {0} deep")]
    TooDeep(usize),
    #[error("answer longer than {0} bytes")]
    TooLong(usize),
}

/// Evaluating a parsed expression at a sample point failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
    #[error("expression is not a finite real number")]
    NonFinite,
}

/// The expression has no exact polynomial normal form in `x`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SymbolicError {
    #[error("not a polynomial: {0}")]
    NotPolynomial(String),
    #[error("coefficient overflow during expansion")]
    Overflow,
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid drill config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a practice set needs at least one card")]
    EmptySet,
}
