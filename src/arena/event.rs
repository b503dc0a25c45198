use crate::agent::AgentProfile;
use crate::game::GameEvent;
use crate::game::MatchResults;
use serde::Deserialize;
use serde::Serialize;

/// Agent identity as embedded in the start event: enough for a later
/// reader to know exactly which variant played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub id: String,
    pub version: String,
    pub display_name: String,
    pub fingerprint: String,
}

impl From<&AgentProfile> for AgentSummary {
    fn from(profile: &AgentProfile) -> Self {
        Self {
            id: profile.id.clone(),
            version: profile.version.clone(),
            display_name: profile.display_name.clone(),
            fingerprint: profile.fingerprint(),
        }
    }
}

/// One line of the match log.
///
/// Actions travel as JSON values so a single event type serves every
/// discipline; the orchestrator serializes the typed action at emission
/// and the replay verifier decodes it against the discipline it was given.
/// Exactly one `MatchStart` opens the stream, one `MatchEnd` closes it,
/// and `Turn` events run in strict `turn_index` order between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    #[serde(rename = "MATCH_START", rename_all = "camelCase")]
    MatchStart {
        match_id: String,
        started_at: String,
        game_id: String,
        game_version: String,
        agents: Vec<AgentSummary>,
        seed_commit: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<serde_json::Value>,
    },
    #[serde(rename = "TURN", rename_all = "camelCase")]
    Turn {
        turn_index: usize,
        player_index: usize,
        observation_hash: String,
        action: serde_json::Value,
        timing_ms: u64,
        timed_out: bool,
        illegal_action: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        original_action: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        events: Option<Vec<GameEvent>>,
    },
    #[serde(rename = "MATCH_END", rename_all = "camelCase")]
    MatchEnd {
        seed_reveal: String,
        results: MatchResults,
        total_turns: usize,
        total_time_ms: u64,
    },
}

impl MatchEvent {
    pub fn is_turn(&self) -> bool {
        matches!(self, MatchEvent::Turn { .. })
    }
}
