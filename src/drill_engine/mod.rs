//! Core drill engine: problem generation, answer grading, and session state.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: problems, flashcards, verdicts, config |
//! | `error`      | Parse, evaluation, symbolic and config errors |
//! | `generator`  | Seeded problem draws and `generate_set()` |
//! | `normalize`  | Implicit-multiplication repair for learner input |
//! | `expression` | Answer-language parser and evaluator |
//! | `checker`    | Numeric-sampling equivalence, `is_equivalent()` |
//! | `symbolic`   | Exact polynomial normal form, the stricter strategy |
//! | `session`    | One practice run: cards, cursor, answers, reveal flag |
//! | `export`     | Answer-key JSON for a UI shell |

pub mod checker;
pub mod error;
pub mod export;
pub mod expression;
pub mod generator;
pub mod models;
pub mod normalize;
pub mod session;
pub mod symbolic;

pub use checker::{check_answer, check_with, is_equivalent};
pub use error::{ConfigError, EvalError, ParseError, SymbolicError};
pub use export::to_answer_key_json;
pub use generator::{generate_flashcard, generate_set, generate_set_with};
pub use models::{
    DrillConfig, EquivalenceStrategy, Flashcard, LinearForm, LinearProblem, OffsetRange,
    Verdict,
};
pub use session::{KeyEntry, PracticeSession, Score};
