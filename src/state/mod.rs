mod player;
mod question;

use crate::notify::{Notifier, Recipient};
use crate::protocol::Event;
use crate::source::QuestionSource;
use crate::types::{GameConfig, Player, PlayerId, Question, QuestionView};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    game: Arc<Mutex<Game>>,
    config: GameConfig,
    source: Arc<dyn QuestionSource>,
    notifier: Notifier,
}

/// The game aggregate. Every read and mutation of these fields happens with
/// the single [`AppState`] mutex held for the whole check-and-set; internal
/// transitions take the guard as `&mut Game` instead of re-locking.
#[derive(Debug, Default)]
struct Game {
    players: HashMap<PlayerId, Player>,
    current_question: Option<Question>,
    in_progress: bool,
}

impl Game {
    fn is_current(&self, question_id: &str) -> bool {
        self.current_question
            .as_ref()
            .is_some_and(|q| q.question_id == question_id)
    }

    /// Delivery snapshot, taken under the lock so broadcasts never race the
    /// registry.
    fn recipients(&self, exclude: Option<&PlayerId>) -> Vec<Recipient> {
        self.players
            .values()
            .filter(|p| exclude != Some(&p.player_id))
            .map(|p| Recipient {
                player_id: p.player_id.clone(),
                endpoint: p.endpoint.clone(),
            })
            .collect()
    }
}

impl AppState {
    pub fn new(config: GameConfig, source: Arc<dyn QuestionSource>, notifier: Notifier) -> Self {
        Self {
            game: Arc::new(Mutex::new(Game::default())),
            config,
            source,
            notifier,
        }
    }

    /// Redacted view of the current question, if any
    pub async fn current_question(&self) -> Option<QuestionView> {
        self.game
            .lock()
            .await
            .current_question
            .as_ref()
            .map(QuestionView::from)
    }

    pub async fn is_current_question(&self, question_id: &str) -> bool {
        self.game.lock().await.is_current(question_id)
    }

    pub async fn is_in_progress(&self) -> bool {
        self.game.lock().await.in_progress
    }

    /// Relay a chat line to everyone. No server-side validation.
    pub async fn post_chat_message(&self, message: String) {
        let recipients = self.game.lock().await.recipients(None);
        self.notifier
            .broadcast(Event::ChatMessage { message }, recipients);
    }
}
