use super::error::GameError;
use super::event::GameEvent;
use super::results::MatchResults;
use crate::rng::Rng;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

/// Seats a discipline can host: an exact count or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerCount {
    Fixed(usize),
    Range { min: usize, max: usize },
}

impl PlayerCount {
    pub fn supports(&self, n: usize) -> bool {
        match *self {
            PlayerCount::Fixed(count) => n == count,
            PlayerCount::Range { min, max } => (min..=max).contains(&n),
        }
    }
}

/// A state transition: the successor state plus any annotations the
/// discipline wants attached to the turn event.
#[derive(Debug, Clone)]
pub struct Step<S> {
    pub state: S,
    pub events: Vec<GameEvent>,
}

impl<S> Step<S> {
    pub fn quiet(state: S) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }
}

/// The rules of one discipline.
///
/// The orchestrator treats `State`, `Action`, `Observation`, and `Config`
/// as opaque: actions are compared only through their canonical encoding,
/// observations only through their canonical hash. Every method is pure in
/// its arguments (`step` additionally in the RNG state it consumes), which
/// is what makes byte-for-byte replay possible.
///
/// Observations must not leak information the game considers private to
/// other seats; `legal_actions` is empty exactly when the player may not
/// act; `results` is meaningful only once `is_terminal` reports true.
pub trait GameDefinition: Send + Sync {
    type State: Clone + std::fmt::Debug + Send;
    type Action: Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned;
    type Observation: Serialize + Send + Sync;
    type Config: Clone + Default + Send + Sync + Serialize + DeserializeOwned;

    fn id(&self) -> &str;
    fn version(&self) -> &str;
    fn players(&self) -> PlayerCount;

    fn reset(
        &self,
        seed: &str,
        players: usize,
        config: &Self::Config,
    ) -> Result<Self::State, GameError>;
    fn observe(&self, state: &Self::State, player: usize) -> Self::Observation;
    fn legal_actions(&self, state: &Self::State, player: usize) -> Vec<Self::Action>;
    fn current_player(&self, state: &Self::State) -> Option<usize>;
    fn step(
        &self,
        state: &Self::State,
        player: usize,
        action: &Self::Action,
        rng: &mut Rng,
    ) -> Result<Step<Self::State>, GameError>;
    fn is_terminal(&self, state: &Self::State) -> bool;
    fn results(&self, state: &Self::State) -> Result<MatchResults, GameError>;

    /// hand counter for disciplines that play multiple hands per match;
    /// surfaced to agents through their decision input
    fn hand_number(&self, _state: &Self::State) -> Option<usize> {
        None
    }
}
