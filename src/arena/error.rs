use super::event::MatchEvent;
use crate::game::GameError;

/// Failures that end (or prevent) a match. Agent misbehavior never shows
/// up here: timeouts and illegal actions are recovered inside the turn
/// loop and recorded on the turn event instead.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// The discipline failed to step. Fatal to the match; carries the
    /// partial event log so callers without an event channel still see
    /// what happened before the failure.
    #[error("game step failed at turn {turn}: {source}")]
    GameStepFailed {
        turn: usize,
        source: GameError,
        events: Vec<MatchEvent>,
    },
    #[error("journal i/o: {0}")]
    Journal(#[from] std::io::Error),
    #[error("encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}
