//! One practice run: a fixed set of cards, a cursor, the learner's answers,
//! and whether the answer key is showing.
//!
//! The session is a plain value owned by whatever drives the UI. Every
//! operation is synchronous; grading happens on demand in [`PracticeSession::answer_key`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    checker::check_with,
    error::ConfigError,
    generator::generate_set,
    models::{DrillConfig, EquivalenceStrategy, Flashcard, Verdict},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticeSession {
    cards: Vec<Flashcard>,
    current: usize,
    /// Sparse: a missing entry means the card has not been answered.
    answers: BTreeMap<usize, String>,
    revealed: bool,
    strategy: EquivalenceStrategy,
}

/// One graded row of the answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEntry {
    pub index: usize,
    pub card_id: String,
    pub question: String,
    pub your_answer: Option<String>,
    pub verdict: Verdict,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

impl PracticeSession {
    /// Fresh session: new cards, first card selected, no answers, key hidden.
    pub fn start(config: &DrillConfig) -> Result<Self, ConfigError> {
        let cards = generate_set(config)?;
        PracticeSession::from_cards(cards, config.strategy).ok_or(ConfigError::EmptySet)
    }

    /// `None` when `cards` is empty, since there would be no current card.
    pub fn from_cards(cards: Vec<Flashcard>, strategy: EquivalenceStrategy) -> Option<Self> {
        if cards.is_empty() {
            return None;
        }
        Some(PracticeSession {
            cards,
            current: 0,
            answers: BTreeMap::new(),
            revealed: false,
            strategy,
        })
    }

    /// Throw the whole session away and start another set.
    pub fn restart(&mut self, config: &DrillConfig) -> Result<(), ConfigError> {
        *self = PracticeSession::start(config)?;
        Ok(())
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_card(&self) -> &Flashcard {
        &self.cards[self.current]
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn strategy(&self) -> EquivalenceStrategy {
        self.strategy
    }

    pub fn answer_for(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// Store the raw text for the current card, replacing any earlier answer.
    pub fn record_answer(&mut self, text: impl Into<String>) {
        self.answers.insert(self.current, text.into());
    }

    /// Move forward, wrapping from the last card to the first.
    pub fn next_card(&mut self) {
        self.current = (self.current + 1) % self.cards.len();
    }

    /// Move back, wrapping from the first card to the last.
    pub fn previous_card(&mut self) {
        self.current = self.current.checked_sub(1).unwrap_or(self.cards.len() - 1);
    }

    /// Move forward; on the last card show the key instead. Returns `true`
    /// when this call revealed the key.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.cards.len() {
            self.current += 1;
            false
        } else {
            self.revealed = true;
            true
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    /// Back to the cards with answers kept.
    pub fn hide(&mut self) {
        self.revealed = false;
    }

    /// Grade every card. Unanswered cards grade as [`Verdict::Blank`].
    pub fn answer_key(&self) -> Vec<KeyEntry> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let your_answer = self.answers.get(&index).cloned();
                let verdict = check_with(
                    self.strategy,
                    your_answer.as_deref().unwrap_or(""),
                    &card.canonical_answer,
                );
                KeyEntry {
                    index,
                    card_id: card.card_id.clone(),
                    question: card.question.clone(),
                    your_answer,
                    verdict,
                    correct_answer: card.display_answer.clone(),
                }
            })
            .collect()
    }

    pub fn score(&self) -> Score {
        let correct = self
            .answer_key()
            .iter()
            .filter(|entry| entry.verdict.is_correct())
            .count();
        Score { correct, total: self.cards.len() }
    }
}
