//! The single-question lifecycle: IDLE (no current question) and ACTIVE
//! (one current question with a timeout watcher running against its id).

use super::{AppState, Game};
use crate::error::{GameError, GameResult};
use crate::matching;
use crate::protocol::{Event, GuessOutcome};
use crate::types::{PlayerId, Question, QuestionView};

impl AppState {
    /// Begin the game: broadcast NEW_GAME, fetch the opening question, and
    /// make it current. A no-op when a game is already in progress. Fails
    /// fatally when the question source yields nothing; the game is then not
    /// started.
    ///
    /// The lock is held across the fetch so concurrent starts serialize and
    /// exactly one NEW_GAME fires.
    pub async fn start(&self) -> GameResult<()> {
        let mut game = self.game.lock().await;
        if game.in_progress {
            return Ok(());
        }

        self.notifier
            .broadcast(Event::NewGame {}, game.recipients(None));

        let question = match self.source.fetch_random().await {
            Ok(Some(question)) => question,
            Ok(None) => {
                return Err(GameError::StartFailed(
                    "question source had no question available".to_string(),
                ))
            }
            Err(e) => return Err(GameError::StartFailed(e.to_string())),
        };

        game.in_progress = true;
        self.install_question(&mut game, question, None);
        Ok(())
    }

    /// IDLE→ACTIVE transition: make `question` current unless a question is
    /// already active, in which case the call is silently dropped (the first
    /// question to land wins the race). Returns whether the install happened.
    ///
    /// `exclude` suppresses the NEW_QUESTION broadcast to one player, used
    /// when that player receives the question in a direct response instead.
    pub async fn set_current_question(
        &self,
        question: Question,
        exclude: Option<&PlayerId>,
    ) -> bool {
        let mut game = self.game.lock().await;
        self.install_question(&mut game, question, exclude)
    }

    /// Return the current question, or fetch and install a fresh one when
    /// idle. The requester is excluded from the NEW_QUESTION broadcast since
    /// the question comes back in this call's return value.
    pub async fn request_question(&self, player_id: &PlayerId) -> GameResult<QuestionView> {
        let mut game = self.game.lock().await;
        if let Some(question) = &game.current_question {
            return Ok(QuestionView::from(question));
        }

        let question = match self.source.fetch_random().await {
            Ok(Some(question)) => question,
            Ok(None) => {
                return Err(GameError::QuestionUnavailable(
                    "question source had no question available".to_string(),
                ))
            }
            Err(e) => return Err(GameError::QuestionUnavailable(e.to_string())),
        };

        let view = QuestionView::from(&question);
        self.install_question(&mut game, question, Some(player_id));
        Ok(view)
    }

    /// Run a guess against the current question. Stats, score, and the
    /// ACTIVE→IDLE transition on a correct guess all happen under the same
    /// guard as the check; only the NEW_ANSWER broadcast is deferred past it.
    pub async fn submit_guess(&self, player_id: &str, guess: &str) -> GameResult<GuessOutcome> {
        let (event, outcome, recipients) = {
            let mut game = self.game.lock().await;
            let question = game
                .current_question
                .clone()
                .ok_or(GameError::NoActiveQuestion)?;

            let is_correct = matching::check_guess(guess, &question.answer);

            let player = game
                .players
                .get_mut(player_id)
                .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))?;
            player.total_answers += 1;
            if is_correct {
                player.correct_answers += 1;
                player.score += question.value;
            }
            let player = player.clone();

            if is_correct {
                tracing::info!(
                    player_id,
                    question_id = %question.question_id,
                    value = question.value,
                    "correct answer"
                );
                game.current_question = None;
            }

            let outcome = GuessOutcome {
                is_correct,
                value: if is_correct { question.value } else { 0 },
            };
            let event = Event::NewAnswer {
                answer: guess.to_string(),
                player,
                is_correct,
            };
            (event, outcome, game.recipients(None))
        };

        self.notifier.broadcast(event, recipients);
        Ok(outcome)
    }

    /// Check-and-set against the held guard; callers own the lock.
    fn install_question(
        &self,
        game: &mut Game,
        question: Question,
        exclude: Option<&PlayerId>,
    ) -> bool {
        if game.current_question.is_some() {
            return false;
        }

        tracing::info!(
            question_id = %question.question_id,
            category = %question.category,
            value = question.value,
            "new current question"
        );

        let view = QuestionView::from(&question);
        let recipients = game.recipients(exclude);
        self.spawn_timeout_watcher(&question);
        game.current_question = Some(question);
        self.notifier.broadcast(Event::NewQuestion(view), recipients);
        true
    }

    /// One timer per installed question, keyed by its id. The watcher fires
    /// once at the deadline; if the question has changed by then it exits
    /// without emitting anything.
    fn spawn_timeout_watcher(&self, question: &Question) {
        let state = self.clone();
        let question_id = question.question_id.clone();
        let answer = question.answer.clone();
        let timeout = self.config.question_timeout;
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            state.expire_question(&question_id, answer).await;
        });
    }

    async fn expire_question(&self, question_id: &str, answer: String) {
        let recipients = {
            let mut game = self.game.lock().await;
            if !game.is_current(question_id) {
                // Stale watcher: the question was answered or replaced
                return;
            }
            game.current_question = None;
            game.recipients(None)
        };

        tracing::info!(question_id, "question timed out");
        self.notifier
            .broadcast(Event::QuestionTimeout { answer }, recipients);
    }
}
