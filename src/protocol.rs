use crate::types::{Player, QuestionView};
use serde::{Deserialize, Serialize};

/// Events pushed to every registered player's endpoint. Transient: built,
/// broadcast, discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    NewPlayer(Player),
    PlayerLeft(Player),
    NewGame {},
    NewQuestion(QuestionView),
    NewAnswer {
        answer: String,
        player: Player,
        is_correct: bool,
    },
    /// The only place the correct answer is ever revealed
    QuestionTimeout {
        answer: String,
    },
    /// Pass-through, no server-side validation
    ChatMessage {
        message: String,
    },
}

// ========== Transport-layer request/response types ==========

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub player_id: String,
    pub address: String,
    pub nick: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuessRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuessOutcome {
    pub is_correct: bool,
    /// The question's point value when correct, 0 otherwise
    pub value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tags_are_screaming_snake_case() {
        let event = Event::NewGame {};
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "NEW_GAME");
        assert_eq!(json["payload"], serde_json::json!({}));

        let event = Event::QuestionTimeout {
            answer: "Paris".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "QUESTION_TIMEOUT");
        assert_eq!(json["payload"]["answer"], "Paris");
    }

    #[test]
    fn chat_message_round_trips() {
        let event = Event::ChatMessage {
            message: "gg".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
