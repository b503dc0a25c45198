use super::definition::PlayerCount;

/// Failures raised by a discipline. Anything a discipline reports from
/// `step` is an implementation bug or corrupted state, never an agent
/// mistake: the orchestrator has already substituted a legal action before
/// stepping.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GameError {
    #[error("player count {got} outside supported {supported:?}")]
    InvalidPlayerCount { got: usize, supported: PlayerCount },
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
    #[error("game state violation: {0}")]
    State(String),
}
