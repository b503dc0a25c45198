use super::action::HoldemAction;
use super::config::HoldemConfig;
use super::observation::HoldemObservation;
use super::table::Table;
use crate::game::GameDefinition;
use crate::game::GameError;
use crate::game::MatchResults;
use crate::game::PlayerCount;
use crate::game::Step;
use crate::rng::Rng;

/// No-Limit Texas Hold'em for 2-6 seats.
///
/// Deck order derives from labeled forks of the match seed rather than
/// draws on the passed stream, so the driver's `next_u32` sequence is the
/// same whether a match lasts one hand or a hundred.
pub struct Holdem;

impl GameDefinition for Holdem {
    type State = Table;
    type Action = HoldemAction;
    type Observation = HoldemObservation;
    type Config = HoldemConfig;

    fn id(&self) -> &str {
        "holdem"
    }
    fn version(&self) -> &str {
        "1.0.0"
    }
    fn players(&self) -> PlayerCount {
        PlayerCount::Range { min: 2, max: 6 }
    }

    fn reset(
        &self,
        seed: &str,
        players: usize,
        config: &HoldemConfig,
    ) -> Result<Table, GameError> {
        if !self.players().supports(players) {
            return Err(GameError::InvalidPlayerCount {
                got: players,
                supported: self.players(),
            });
        }
        Table::new(seed, players, config.clone())
    }

    fn observe(&self, state: &Table, player: usize) -> HoldemObservation {
        HoldemObservation::of(state, player)
    }

    fn legal_actions(&self, state: &Table, player: usize) -> Vec<HoldemAction> {
        state.legal_actions(player)
    }

    fn current_player(&self, state: &Table) -> Option<usize> {
        state.to_act()
    }

    fn step(
        &self,
        state: &Table,
        player: usize,
        action: &HoldemAction,
        _rng: &mut Rng,
    ) -> Result<Step<Table>, GameError> {
        let mut next = state.clone();
        let events = next.apply(player, action)?;
        Ok(Step {
            state: next,
            events,
        })
    }

    fn is_terminal(&self, state: &Table) -> bool {
        state.is_terminal()
    }

    fn results(&self, state: &Table) -> Result<MatchResults, GameError> {
        if !state.is_terminal() {
            return Err(GameError::State("results before the match ends".to_string()));
        }
        Ok(MatchResults::from_scores(
            state.seats().iter().map(|s| s.chips as f64).collect(),
        ))
    }

    fn hand_number(&self, state: &Table) -> Option<usize> {
        Some(state.hand_number())
    }
}
