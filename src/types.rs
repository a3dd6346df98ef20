use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opaque ID types for type safety
pub type PlayerId = String;
pub type QuestionId = String;

/// A registered participant. The id is caller-supplied and treated as
/// untrusted input; the registry only guarantees map semantics over it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub player_id: PlayerId,
    /// Address the transport layer delivers events to
    pub endpoint: String,
    pub nick: String,
    pub score: i64,
    pub correct_answers: u32,
    pub total_answers: u32,
}

impl Player {
    pub fn new(player_id: PlayerId, endpoint: String, nick: String) -> Self {
        Self {
            player_id,
            endpoint,
            nick,
            score: 0,
            correct_answers: 0,
            total_answers: 0,
        }
    }
}

/// The single active question. Immutable once created; never serialized
/// directly for clients (see [`QuestionView`]).
#[derive(Debug, Clone)]
pub struct Question {
    pub question_id: QuestionId,
    pub text: String,
    pub answer: String,
    pub category: String,
    pub value: i64,
}

/// Client-facing serialization of a question. The answer field is always
/// blanked; this is a confidentiality invariant, not an optimization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionView {
    pub question_id: QuestionId,
    pub text: String,
    pub answer: String,
    pub category: String,
    pub value: i64,
}

impl From<&Question> for QuestionView {
    fn from(q: &Question) -> Self {
        Self {
            question_id: q.question_id.clone(),
            text: q.text.clone(),
            answer: String::new(),
            category: q.category.clone(),
            value: q.value,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// How long a question stays current without a correct guess
    pub question_timeout: Duration,
    /// Max concurrent outbound notification deliveries
    pub notify_concurrency: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            question_timeout: Duration::from_secs(30),
            notify_concurrency: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_view_redacts_answer() {
        let question = Question {
            question_id: "q1".to_string(),
            text: "Capital of France".to_string(),
            answer: "Paris".to_string(),
            category: "Geography".to_string(),
            value: 200,
        };

        let view = QuestionView::from(&question);
        assert_eq!(view.answer, "");
        assert_eq!(view.text, "Capital of France");
        assert_eq!(view.value, 200);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["answer"], "");
    }
}
