//! Crate-level tests for `algebra_drill_gen`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical set; different seeds → varied sets |
//! | Identity | Every generated question equals its canonical answer as a function of `x` |
//! | Grading | Reflexivity, rewriting invariance, blank and malformed answers |
//! | Scenarios | Boundary `(1, 0, 0)` and negative-intercept `(2, 1, -5)` cards |
//! | End-to-end | A full set answered from its own key scores 10/10 under both strategies |
//! | Strategies | Symbolic grading agrees with numeric sampling on generated sets |

use crate::drill_engine::{
    check_with, generate_set, generate_set_with, is_equivalent,
    expression::parse_expression,
    generator::build_flashcard,
    DrillConfig, EquivalenceStrategy, LinearProblem, OffsetRange, PracticeSession, Score,
    Verdict,
};
use rand::{rngs::StdRng, SeedableRng};

// ── helpers ──────────────────────────────────────────────────────────────────

fn config(seed: u64) -> DrillConfig {
    DrillConfig::new().with_seed(seed)
}

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

const BOTH_RANGES: [OffsetRange; 2] = [OffsetRange::Positive, OffsetRange::Signed];

const BOTH_STRATEGIES: [EquivalenceStrategy; 2] =
    [EquivalenceStrategy::Numeric, EquivalenceStrategy::Symbolic];

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_produces_identical_set() {
    for range in BOTH_RANGES {
        let a = generate_set(&config(12345).with_offset_range(range)).unwrap();
        let b = generate_set(&config(12345).with_offset_range(range)).unwrap();
        assert_eq!(a, b, "set mismatch for {range:?}");
    }
}

#[test]
fn different_seeds_produce_varied_sets() {
    let mut same_count = 0usize;
    let pairs = 40u64;
    for seed in 0..pairs {
        let a = generate_set(&config(seed)).unwrap();
        let b = generate_set(&config(seed + 500)).unwrap();
        let qa: Vec<_> = a.iter().map(|c| &c.question).collect();
        let qb: Vec<_> = b.iter().map(|c| &c.question).collect();
        if qa == qb {
            same_count += 1;
        }
    }
    assert_eq!(same_count, 0, "identical sets across different seeds ({same_count}/{pairs})");
}

#[test]
fn entropy_seed_produces_a_valid_set() {
    let cards = generate_set(&DrillConfig::new()).unwrap();
    assert_eq!(cards.len(), 10);
    assert!(cards.iter().all(|c| !c.is_error()));
}

#[test]
fn card_ids_are_deterministic_and_mostly_unique() {
    let cards = generate_set(&config(77).with_set_size(50)).unwrap();
    let again = generate_set(&config(77).with_set_size(50)).unwrap();
    let ids: std::collections::HashSet<_> = cards.iter().map(|c| c.card_id.clone()).collect();
    assert!(ids.len() >= 49, "too many colliding card ids");
    for (a, b) in cards.iter().zip(&again) {
        assert_eq!(a.card_id, b.card_id);
    }
}

// ── algebraic identity ───────────────────────────────────────────────────────

#[test]
fn generated_questions_equal_their_canonical_answers() {
    for range in BOTH_RANGES {
        for seed in SEEDS {
            let mut rng = StdRng::seed_from_u64(seed);
            for card in generate_set_with(&mut rng, 25, range) {
                let question = parse_expression(&card.question).unwrap();
                let canonical = parse_expression(&card.canonical_answer).unwrap();
                for x in [-10.0, -3.3, 0.0, 1.0, 2.5, 8.75] {
                    let q = question.eval(x).unwrap();
                    let c = canonical.eval(x).unwrap();
                    assert!(
                        (q - c).abs() < 1e-9,
                        "{} != {} at x = {x} (seed {seed})",
                        card.question,
                        card.canonical_answer
                    );
                }
            }
        }
    }
}

#[test]
fn question_text_never_ends_in_plus_zero() {
    let mut rng = StdRng::seed_from_u64(2024);
    for card in generate_set_with(&mut rng, 300, OffsetRange::Signed) {
        assert!(!card.question.ends_with("+ 0"), "{}", card.question);
        assert!(!card.display_answer.ends_with("+ 0"), "{}", card.display_answer);
        assert!(!card.display_answer.ends_with("- 0"), "{}", card.display_answer);
    }
}

#[test]
fn the_question_itself_is_an_accepted_answer() {
    let cards = generate_set(&config(31)).unwrap();
    for card in &cards {
        assert!(is_equivalent(&card.question, &card.canonical_answer), "{}", card.question);
    }
}

// ── grading ──────────────────────────────────────────────────────────────────

#[test]
fn equivalence_is_reflexive() {
    for card in generate_set(&config(8)).unwrap() {
        assert!(is_equivalent(&card.canonical_answer, &card.canonical_answer));
    }
}

#[test]
fn equivalent_rewritings_all_grade_correct() {
    for answer in ["4x+11", "11 + 4x", "4*x+11", "  4 x + 11 "] {
        for strategy in BOTH_STRATEGIES {
            assert!(
                check_with(strategy, answer, "4*x + 11").is_correct(),
                "{answer:?} rejected by {strategy}"
            );
        }
    }
}

#[test]
fn blank_answer_is_always_wrong() {
    for canonical in ["4*x + 11", "1*x + 0", "0"] {
        assert!(!is_equivalent("", canonical));
    }
}

#[test]
fn malformed_answer_grades_false_without_panicking() {
    assert!(!is_equivalent("not an expression", "4*x + 11"));
    assert!(!is_equivalent("4x ++ 11)", "4*x + 11"));
    assert!(!is_equivalent("4x + 11 = 0", "4*x + 11"));
    assert!(!is_equivalent("¯\\_(ツ)_/¯", "4*x + 11"));
}

// ── scenarios ────────────────────────────────────────────────────────────────

#[test]
fn boundary_scenario() {
    let card = build_flashcard("LX-B".into(), LinearProblem::new(1, 0, 0));
    assert_eq!(card.question, "(x)");
    assert_eq!(card.display_answer, "x");
    assert_eq!(card.canonical_answer, "1*x + 0");
    assert!(is_equivalent("x", &card.canonical_answer));
}

#[test]
fn negative_intercept_scenario() {
    let card = build_flashcard("LX-N".into(), LinearProblem::new(2, 1, -5));
    assert_eq!(card.display_answer, "2x - 3");
    assert!(is_equivalent("2x-3", "2*x + -3"));
    assert!(is_equivalent("2x-3", &card.canonical_answer));
}

#[test]
fn error_card_never_accepts_the_error_marker() {
    let card = build_flashcard("LX-E".into(), LinearProblem::new(i32::MAX, 4, 0));
    assert!(card.is_error());
    assert!(!is_equivalent(&card.display_answer, &card.canonical_answer));
}

// ── end-to-end ───────────────────────────────────────────────────────────────

#[test]
fn answering_with_the_key_scores_ten_out_of_ten() {
    for strategy in BOTH_STRATEGIES {
        for seed in SEEDS {
            let cfg = config(seed).with_strategy(strategy);
            let mut session = PracticeSession::start(&cfg).unwrap();
            loop {
                let answer = session.current_card().display_answer.replace(' ', "");
                session.record_answer(answer);
                if session.advance() {
                    break;
                }
            }
            assert!(session.is_revealed());
            assert_eq!(
                session.score(),
                Score { correct: 10, total: 10 },
                "seed {seed}, {strategy}"
            );
        }
    }
}

#[test]
fn partially_answered_session_scores_what_was_right() {
    let mut session = PracticeSession::start(&config(55)).unwrap();
    let first = session.current_card().display_answer.clone();
    session.record_answer(first);
    session.next_card();
    session.record_answer("definitely wrong");
    session.next_card();
    session.record_answer("x + 1000");
    session.reveal();

    let key = session.answer_key();
    assert!(key[0].verdict.is_correct());
    assert!(matches!(key[1].verdict, Verdict::Malformed { .. }));
    assert!(matches!(key[2].verdict, Verdict::Mismatch { .. }));
    assert!(key[3..].iter().all(|e| e.verdict == Verdict::Blank));
    assert_eq!(session.score(), Score { correct: 1, total: 10 });
}

// ── strategies ───────────────────────────────────────────────────────────────

#[test]
fn symbolic_and_numeric_agree_on_generated_sets() {
    let wrong = ["x", "2x + 1", "5x - 5", "3x + 3", "", "oops"];
    for seed in SEEDS {
        for card in generate_set(&config(seed)).unwrap() {
            let mut answers: Vec<String> = wrong.iter().map(|s| s.to_string()).collect();
            answers.push(card.display_answer.clone());
            answers.push(card.question.clone());
            for answer in &answers {
                let numeric = check_with(EquivalenceStrategy::Numeric, answer, &card.canonical_answer);
                let symbolic = check_with(EquivalenceStrategy::Symbolic, answer, &card.canonical_answer);
                assert_eq!(
                    numeric.is_correct(),
                    symbolic.is_correct(),
                    "{answer:?} vs {} disagreed",
                    card.canonical_answer
                );
            }
        }
    }
}
