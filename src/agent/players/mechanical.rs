use super::super::agent::Agent;
use super::super::agent::AgentError;
use super::super::agent::DecideInput;
use super::super::agent::Decision;
use super::super::profile::AgentProfile;
use crate::game::GameDefinition;

/// Baseline agent that always takes the first legal action. Useful as a
/// ladder floor and as the embodiment of the orchestrator's own fallback
/// behavior.
pub struct Mechanical {
    profile: AgentProfile,
}

impl Mechanical {
    pub fn new(id: &str) -> Self {
        Self {
            profile: AgentProfile::local(id),
        }
    }
}

#[async_trait::async_trait]
impl<G: GameDefinition> Agent<G> for Mechanical {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn decide(
        &mut self,
        input: &DecideInput<'_, G>,
    ) -> Result<Decision<G::Action>, AgentError> {
        input
            .legal_actions
            .first()
            .cloned()
            .map(Decision::of)
            .ok_or_else(|| AgentError("no legal actions offered".to_string()))
    }
}
