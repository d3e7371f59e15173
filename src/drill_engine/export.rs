use serde_json::{json, Value};

use crate::drill_engine::session::{KeyEntry, PracticeSession};

/// One answer-key row. The correct answer and verdict are withheld until the
/// key is revealed.
fn key_row(entry: &KeyEntry, revealed: bool) -> Value {
    let mut row = json!({
        "index":       entry.index,
        "card_id":     entry.card_id,
        "question":    entry.question,
        "your_answer": entry.your_answer,
    });
    if revealed {
        row["mark"] = json!(entry.verdict.mark());
        row["correct_answer"] = json!(entry.correct_answer);
        row["verdict"] = json!(entry.verdict);
    }
    row
}

/// Map a session to the JSON object a UI shell renders as the answer-key screen.
pub fn to_answer_key_json(session: &PracticeSession) -> Value {
    let revealed = session.is_revealed();
    let key = session.answer_key();
    let correct = key.iter().filter(|e| e.verdict.is_correct()).count();

    let mut out = json!({
        "revealed": revealed,
        "strategy": session.strategy().to_string(),
        "current_index": session.current_index(),
        "cards": key.iter().map(|e| key_row(e, revealed)).collect::<Vec<_>>(),
    });
    if revealed {
        out["score"] = json!({ "correct": correct, "total": key.len() });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::DrillConfig;

    #[test]
    fn hidden_session_does_not_leak_answers() {
        let mut session = PracticeSession::start(&DrillConfig::new().with_seed(9)).unwrap();
        session.record_answer("x");
        let out = to_answer_key_json(&session);
        assert_eq!(out["revealed"], json!(false));
        assert!(out.get("score").is_none());
        let first = &out["cards"][0];
        assert_eq!(first["your_answer"], json!("x"));
        assert!(first.get("correct_answer").is_none());
        assert!(first.get("verdict").is_none());
        assert_eq!(out["cards"][1]["your_answer"], Value::Null);
    }

    #[test]
    fn revealed_session_includes_marks_and_score() {
        let mut session = PracticeSession::start(&DrillConfig::new().with_seed(9)).unwrap();
        let answer = session.current_card().display_answer.clone();
        session.record_answer(answer.clone());
        session.reveal();

        let out = to_answer_key_json(&session);
        assert_eq!(out["score"], json!({ "correct": 1, "total": 10 }));
        let first = &out["cards"][0];
        assert_eq!(first["mark"], json!("✓"));
        assert_eq!(first["correct_answer"], json!(answer));
        assert_eq!(first["verdict"]["kind"], json!("correct"));
        assert_eq!(out["cards"][1]["mark"], json!("✗"));
        assert_eq!(out["cards"][1]["verdict"]["kind"], json!("blank"));
    }
}
