use super::event::AgentSummary;
use super::event::MatchEvent;
use crate::game::MatchResults;
use serde::Serialize;

/// Everything one match produced. The event list holds exactly one
/// `MatchStart`, one `Turn` per call to `step` in strict order, and one
/// `MatchEnd`; `verify(seed, seed_commit)` holds by construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub match_id: String,
    pub game_id: String,
    pub game_version: String,
    pub seed: String,
    pub seed_commit: String,
    pub agents: Vec<AgentSummary>,
    pub results: MatchResults,
    pub events: Vec<MatchEvent>,
    pub total_turns: usize,
    pub total_time_ms: u64,
}

impl MatchReport {
    pub fn turns(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().filter(|e| e.is_turn())
    }
}
