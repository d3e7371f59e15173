//! End-to-end demo of a practice session.
//!
//! Run with: `cargo run --example demo`
//!
//! 1. **A seeded set**: ten cards from a fixed seed, with their answer keys,
//!    so the output is reproducible.
//! 2. **A session**: answer a few cards (some right, some in shorthand, some
//!    wrong), reveal the key, and print both the graded rows and the JSON a UI
//!    shell would render.
//! 3. **Strategies**: the same answers graded by numeric sampling and by exact
//!    polynomial normal form.
//!
//! Logging goes through `simplelog`; set the level to `Debug` to see the
//! generated set and the fallback decisions of the symbolic checker.

use algebra_drill_gen::{
    check_with, generate_set, to_answer_key_json, DrillConfig, EquivalenceStrategy,
    OffsetRange, PracticeSession,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // ── A seeded set ───────────────────────────────────────────────────────
    println!();
    println!("══ Seeded set (seed 42, offsets in [-4, 4]) ══");
    println!();
    let config = DrillConfig::new().with_seed(42);
    for (i, card) in generate_set(&config)?.iter().enumerate() {
        println!(
            "  {:>2}. [{}]  {:<22} =  {:<10}  (grades against {})",
            i + 1,
            card.card_id,
            card.question,
            card.display_answer,
            card.canonical_answer
        );
    }

    // ── A session ──────────────────────────────────────────────────────────
    println!();
    println!("══ Practice session (seed 7, offsets in [1, 5]) ══");
    println!();
    let config = DrillConfig::new()
        .with_seed(7)
        .with_offset_range(OffsetRange::Positive);
    let mut session = PracticeSession::start(&config)?;

    // Card 1: exactly the key. Card 2: the key with spaces stripped.
    // Card 3: the unexpanded question. Card 4: wrong. Card 5: gibberish.
    let key_answer = session.current_card().display_answer.clone();
    session.record_answer(key_answer);
    session.advance();
    let squashed = session.current_card().display_answer.replace(' ', "");
    session.record_answer(squashed);
    session.advance();
    let unexpanded = session.current_card().question.clone();
    session.record_answer(unexpanded);
    session.advance();
    session.record_answer("x + 100");
    session.advance();
    session.record_answer("seven");
    while !session.advance() {}

    for entry in session.answer_key() {
        println!(
            "  Q{:<2} {:<22} your answer: {:<22} {}  correct: {}",
            entry.index + 1,
            entry.question,
            entry.your_answer.as_deref().unwrap_or("(none)"),
            entry.verdict.mark(),
            entry.correct_answer
        );
        if !entry.verdict.is_correct() {
            println!("       {}", entry.verdict);
        }
    }
    println!();
    println!("  Score: {}", session.score());
    println!();
    println!("{}", serde_json::to_string_pretty(&to_answer_key_json(&session))?);

    // ── Strategies ─────────────────────────────────────────────────────────
    println!();
    println!("══ Numeric vs symbolic grading against 4*x + 11 ══");
    println!();
    for answer in ["4x+11", "(8x + 22)/2", "4x + 11.0000000001", "x*x/x + 3x + 11", "4x + 12"] {
        let numeric = check_with(EquivalenceStrategy::Numeric, answer, "4*x + 11");
        let symbolic = check_with(EquivalenceStrategy::Symbolic, answer, "4*x + 11");
        println!(
            "  {:<22} numeric: {}  symbolic: {}",
            answer,
            numeric.mark(),
            symbolic.mark()
        );
    }
    println!();

    Ok(())
}
