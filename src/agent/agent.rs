use super::profile::AgentProfile;
use crate::game::GameDefinition;
use serde::Serialize;

/// soft deadline the agent is told about; enforcement lives in the
/// orchestrator
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Clock {
    pub turn_timeout_ms: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnMeta {
    pub turn_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand_number: Option<usize>,
}

/// Everything an agent may condition on for one decision.
pub struct DecideInput<'a, G: GameDefinition> {
    pub match_id: &'a str,
    pub game_id: &'a str,
    pub game_version: &'a str,
    pub player_index: usize,
    pub observation: &'a G::Observation,
    pub legal_actions: &'a [G::Action],
    pub clock: Clock,
    pub meta: TurnMeta,
}

#[derive(Debug, Clone)]
pub struct Decision<A> {
    pub action: A,
    pub reason: Option<String>,
}

impl<A> Decision<A> {
    pub fn of(action: A) -> Self {
        Self {
            action,
            reason: None,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("agent failure: {0}")]
pub struct AgentError(pub String);

/// Trait for entities that make decisions inside a match.
///
/// Implementations can be local bots, humans, LLM transports, webhooks --
/// the orchestrator doesn't care, it only awaits `decide` under a
/// deadline. Agents may be nondeterministic, but a conformant agent
/// derives its own randomness from `(match_id, turn_index)` so whole
/// matches stay reproducible.
#[async_trait::async_trait]
pub trait Agent<G: GameDefinition>: Send {
    fn profile(&self) -> &AgentProfile;

    async fn decide(
        &mut self,
        input: &DecideInput<'_, G>,
    ) -> Result<Decision<G::Action>, AgentError>;
}

const REASON_MAX_LEN: usize = 500;

/// Reasons are untrusted free text; strip control characters and cap
/// length before they reach any log or display.
pub fn sanitize_reason(reason: &str) -> String {
    reason
        .chars()
        .filter(|c| !c.is_control())
        .take(REASON_MAX_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize_reason("a\x1b[31mb\nc\td"), "a[31mbcd");
    }

    #[test]
    fn sanitize_caps_length() {
        let long = "x".repeat(2000);
        assert_eq!(sanitize_reason(&long).len(), REASON_MAX_LEN);
    }

    #[test]
    fn sanitize_keeps_ordinary_text() {
        assert_eq!(sanitize_reason("pot odds are 3:1"), "pot odds are 3:1");
    }
}
