use super::super::agent::Agent;
use super::super::agent::AgentError;
use super::super::agent::DecideInput;
use super::super::agent::Decision;
use super::super::profile::AgentProfile;
use crate::game::GameDefinition;
use crate::rng::Rng;

/// Uniform-random agent reseeded from `(match_id, turn_index)` each turn,
/// so a rerun of the same match makes the same picks.
pub struct Uniform {
    profile: AgentProfile,
}

impl Uniform {
    pub fn new(id: &str) -> Self {
        Self {
            profile: AgentProfile::local(id),
        }
    }
}

#[async_trait::async_trait]
impl<G: GameDefinition> Agent<G> for Uniform {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    async fn decide(
        &mut self,
        input: &DecideInput<'_, G>,
    ) -> Result<Decision<G::Action>, AgentError> {
        let mut rng = Rng::new(&format!("{}:{}", input.match_id, input.meta.turn_index));
        rng.pick(input.legal_actions)
            .map(|action| Decision::of(action.clone()))
            .map_err(|e| AgentError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;

    #[test]
    fn picks_are_reproducible_per_turn() {
        let xs = ["a", "b", "c"];
        let mut one = Rng::new("m-1:7");
        let mut two = Rng::new("m-1:7");
        assert_eq!(one.pick(&xs).unwrap(), two.pick(&xs).unwrap());
    }
}
