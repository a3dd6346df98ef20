use crate::types::PlayerId;

/// Result type for game operations
pub type GameResult<T> = Result<T, GameError>;

/// Errors surfaced by game transitions. Per-recipient delivery failures are
/// deliberately not represented here: they are logged and swallowed in the
/// fan-out workers and never reach the originating transition.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The question source yielded nothing at game start; the start aborts.
    #[error("failed to fetch starting question: {0}")]
    StartFailed(String),

    /// The question source yielded nothing for an on-demand fetch.
    #[error("failed to fetch question: {0}")]
    QuestionUnavailable(String),

    #[error("there is no current question")]
    NoActiveQuestion,

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
}
