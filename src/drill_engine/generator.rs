use std::ops::RangeInclusive;

use log::{debug, error};
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::drill_engine::{
    error::ConfigError,
    models::{DrillConfig, Flashcard, LinearProblem, OffsetRange},
};

/// Leading coefficient `a`; never zero, so the factored term never degenerates.
pub const COEFFICIENT_RANGE: RangeInclusive<i32> = 1..=5;
/// Outer additive term `c`.
pub const CONSTANT_RANGE: RangeInclusive<i32> = -5..=4;

const CARD_PREFIX: &str = "LX";

/// Card ID from the RNG stream, e.g. `LX-3F09A1C2`.
fn make_card_id(rng: &mut impl RngCore) -> String {
    format!("{}-{:08X}", CARD_PREFIX, rng.next_u32())
}

/// Draw `(coefficient, offset, constant)` uniformly from their ranges.
pub fn draw_problem<R: Rng>(rng: &mut R, offset_range: OffsetRange) -> LinearProblem {
    let coefficient = rng.gen_range(COEFFICIENT_RANGE);
    let offset = rng.gen_range(offset_range.bounds());
    let constant = rng.gen_range(CONSTANT_RANGE);
    LinearProblem::new(coefficient, offset, constant)
}

/// Build every text form of a card from one problem.
///
/// Falls back to the error sentinel if the expansion overflows, which only
/// happens for hand-built problems far outside the drawn ranges.
pub fn build_flashcard(card_id: String, problem: LinearProblem) -> Flashcard {
    match problem.expand() {
        Some(form) => Flashcard {
            card_id,
            problem,
            question: problem.to_string(),
            canonical_answer: form.canonical(),
            display_answer: form.to_string(),
        },
        None => {
            error!("could not expand {problem}; card {card_id} marked as ERROR");
            Flashcard::error(card_id, problem)
        }
    }
}

pub fn generate_flashcard<R: Rng>(rng: &mut R, offset_range: OffsetRange) -> Flashcard {
    let card_id = make_card_id(rng);
    let problem = draw_problem(rng, offset_range);
    build_flashcard(card_id, problem)
}

/// `n` independent cards from one RNG stream.
pub fn generate_set_with<R: Rng>(rng: &mut R, n: usize, offset_range: OffsetRange) -> Vec<Flashcard> {
    (0..n).map(|_| generate_flashcard(rng, offset_range)).collect()
}

/// Generate a practice set as configured. Seeded configs are reproducible.
pub fn generate_set(config: &DrillConfig) -> Result<Vec<Flashcard>, ConfigError> {
    config.validate()?;

    let mut rng: StdRng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cards = generate_set_with(&mut rng, config.set_size, config.offset_range);
    debug!(
        "generated {} cards ({}): {:?}",
        cards.len(),
        config.offset_range,
        cards.iter().map(|c| c.question.as_str()).collect::<Vec<_>>()
    );
    Ok(cards)
}
