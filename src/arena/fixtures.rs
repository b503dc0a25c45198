//! Toy disciplines and scripted agents for exercising the match core.
//! Small enough to reason about by hand, awkward enough to hit the edge
//! cases: timeouts, illegal actions, draws, tampered logs.
use crate::agent::Agent;
use crate::agent::AgentError;
use crate::agent::AgentProfile;
use crate::agent::DecideInput;
use crate::agent::Decision;
use crate::game::GameDefinition;
use crate::game::GameError;
use crate::game::MatchResults;
use crate::game::PlayerCount;
use crate::game::Step;
use crate::rng::Rng;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Two players alternate choosing from {1, 2, 3}; highest total wins.
pub struct Counting {
    rounds: usize,
}

impl Counting {
    pub fn rounds(rounds: usize) -> Self {
        Self { rounds }
    }
}

#[derive(Debug, Clone)]
pub struct CountingState {
    scores: [u32; 2],
    turns_taken: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountingObs {
    player: usize,
    turns_taken: usize,
    score: u32,
}

impl GameDefinition for Counting {
    type State = CountingState;
    type Action = u32;
    type Observation = CountingObs;
    type Config = ();

    fn id(&self) -> &str {
        "counting"
    }
    fn version(&self) -> &str {
        "1"
    }
    fn players(&self) -> PlayerCount {
        PlayerCount::Fixed(2)
    }
    fn reset(&self, _seed: &str, players: usize, _config: &()) -> Result<CountingState, GameError> {
        if players != 2 {
            return Err(GameError::InvalidPlayerCount {
                got: players,
                supported: self.players(),
            });
        }
        Ok(CountingState {
            scores: [0, 0],
            turns_taken: 0,
        })
    }
    fn observe(&self, state: &CountingState, player: usize) -> CountingObs {
        CountingObs {
            player,
            turns_taken: state.turns_taken,
            score: state.scores[player],
        }
    }
    fn legal_actions(&self, state: &CountingState, player: usize) -> Vec<u32> {
        match self.current_player(state) {
            Some(p) if p == player => vec![1, 2, 3],
            _ => vec![],
        }
    }
    fn current_player(&self, state: &CountingState) -> Option<usize> {
        match self.is_terminal(state) {
            true => None,
            false => Some(state.turns_taken % 2),
        }
    }
    fn step(
        &self,
        state: &CountingState,
        player: usize,
        action: &u32,
        _rng: &mut Rng,
    ) -> Result<Step<CountingState>, GameError> {
        if !(1..=3).contains(action) {
            return Err(GameError::State(format!("unplayable action {}", action)));
        }
        let mut next = state.clone();
        next.scores[player] += action;
        next.turns_taken += 1;
        Ok(Step::quiet(next))
    }
    fn is_terminal(&self, state: &CountingState) -> bool {
        state.turns_taken >= self.rounds * 2
    }
    fn results(&self, state: &CountingState) -> Result<MatchResults, GameError> {
        Ok(MatchResults::from_scores(
            state.scores.iter().map(|&s| s as f64).collect(),
        ))
    }
}

/// Counting variant whose `step` fails once the configured turn is
/// reached. Scores stay reportable mid-match, so the driver's
/// best-effort end event has something to say.
pub struct Brittle {
    rounds: usize,
    fail_at: usize,
}

impl Brittle {
    pub fn failing_at(rounds: usize, fail_at: usize) -> Self {
        Self { rounds, fail_at }
    }
}

impl GameDefinition for Brittle {
    type State = CountingState;
    type Action = u32;
    type Observation = CountingObs;
    type Config = ();

    fn id(&self) -> &str {
        "brittle"
    }
    fn version(&self) -> &str {
        "1"
    }
    fn players(&self) -> PlayerCount {
        PlayerCount::Fixed(2)
    }
    fn reset(&self, _seed: &str, players: usize, _config: &()) -> Result<CountingState, GameError> {
        if players != 2 {
            return Err(GameError::InvalidPlayerCount {
                got: players,
                supported: self.players(),
            });
        }
        Ok(CountingState {
            scores: [0, 0],
            turns_taken: 0,
        })
    }
    fn observe(&self, state: &CountingState, player: usize) -> CountingObs {
        CountingObs {
            player,
            turns_taken: state.turns_taken,
            score: state.scores[player],
        }
    }
    fn legal_actions(&self, state: &CountingState, player: usize) -> Vec<u32> {
        match self.current_player(state) {
            Some(p) if p == player => vec![1, 2, 3],
            _ => vec![],
        }
    }
    fn current_player(&self, state: &CountingState) -> Option<usize> {
        match self.is_terminal(state) {
            true => None,
            false => Some(state.turns_taken % 2),
        }
    }
    fn step(
        &self,
        state: &CountingState,
        player: usize,
        action: &u32,
        _rng: &mut Rng,
    ) -> Result<Step<CountingState>, GameError> {
        if state.turns_taken == self.fail_at {
            return Err(GameError::State("injected step failure".to_string()));
        }
        let mut next = state.clone();
        next.scores[player] += action;
        next.turns_taken += 1;
        Ok(Step::quiet(next))
    }
    fn is_terminal(&self, state: &CountingState) -> bool {
        state.turns_taken >= self.rounds * 2
    }
    fn results(&self, state: &CountingState) -> Result<MatchResults, GameError> {
        Ok(MatchResults::from_scores(
            state.scores.iter().map(|&s| s as f64).collect(),
        ))
    }
}

/// One-round Rock-Paper-Scissors with string actions; player 0 commits
/// first, hidden from player 1.
pub struct Rps;

#[derive(Debug, Clone, Default)]
pub struct RpsState {
    moves: [Option<String>; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpsObs {
    player: usize,
    committed: bool,
}

fn beats(a: &str, b: &str) -> bool {
    matches!(
        (a, b),
        ("rock", "scissors") | ("scissors", "paper") | ("paper", "rock")
    )
}

impl GameDefinition for Rps {
    type State = RpsState;
    type Action = String;
    type Observation = RpsObs;
    type Config = ();

    fn id(&self) -> &str {
        "rps"
    }
    fn version(&self) -> &str {
        "1"
    }
    fn players(&self) -> PlayerCount {
        PlayerCount::Fixed(2)
    }
    fn reset(&self, _seed: &str, players: usize, _config: &()) -> Result<RpsState, GameError> {
        if players != 2 {
            return Err(GameError::InvalidPlayerCount {
                got: players,
                supported: self.players(),
            });
        }
        Ok(RpsState::default())
    }
    fn observe(&self, state: &RpsState, player: usize) -> RpsObs {
        RpsObs {
            player,
            committed: state.moves[player].is_some(),
        }
    }
    fn legal_actions(&self, state: &RpsState, player: usize) -> Vec<String> {
        match self.current_player(state) {
            Some(p) if p == player => ["rock", "paper", "scissors"]
                .into_iter()
                .map(String::from)
                .collect(),
            _ => vec![],
        }
    }
    fn current_player(&self, state: &RpsState) -> Option<usize> {
        state.moves.iter().position(Option::is_none)
    }
    fn step(
        &self,
        state: &RpsState,
        player: usize,
        action: &String,
        _rng: &mut Rng,
    ) -> Result<Step<RpsState>, GameError> {
        let mut next = state.clone();
        next.moves[player] = Some(action.clone());
        Ok(Step::quiet(next))
    }
    fn is_terminal(&self, state: &RpsState) -> bool {
        state.moves.iter().all(Option::is_some)
    }
    fn results(&self, state: &RpsState) -> Result<MatchResults, GameError> {
        let a = state.moves[0]
            .as_deref()
            .ok_or_else(|| GameError::State("results before terminal".to_string()))?;
        let b = state.moves[1]
            .as_deref()
            .ok_or_else(|| GameError::State("results before terminal".to_string()))?;
        let scores = if beats(a, b) {
            vec![1.0, 0.0]
        } else if beats(b, a) {
            vec![0.0, 1.0]
        } else {
            vec![0.5, 0.5]
        };
        Ok(MatchResults::from_scores(scores))
    }
}

/// Plays a fixed script of counting moves, legal or not.
pub struct Scripted {
    profile: AgentProfile,
    plays: Vec<u32>,
    cursor: usize,
}

impl Scripted {
    pub fn new(id: &str, plays: Vec<u32>) -> Self {
        Self {
            profile: AgentProfile::local(id),
            plays,
            cursor: 0,
        }
    }
}

#[async_trait::async_trait]
impl Agent<Counting> for Scripted {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }
    async fn decide(
        &mut self,
        _input: &DecideInput<'_, Counting>,
    ) -> Result<Decision<u32>, AgentError> {
        let play = self
            .plays
            .get(self.cursor)
            .copied()
            .ok_or_else(|| AgentError("script exhausted".to_string()))?;
        self.cursor += 1;
        Ok(Decision::of(play))
    }
}

/// Always throws rock.
pub struct Rock {
    profile: AgentProfile,
}

impl Rock {
    pub fn new(id: &str) -> Self {
        Self {
            profile: AgentProfile::local(id),
        }
    }
}

#[async_trait::async_trait]
impl Agent<Rps> for Rock {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }
    async fn decide(
        &mut self,
        _input: &DecideInput<'_, Rps>,
    ) -> Result<Decision<String>, AgentError> {
        Ok(Decision::of("rock".to_string()))
    }
}

/// Sleeps past any reasonable deadline before answering.
pub struct Sleepy {
    profile: AgentProfile,
    delay: Duration,
}

impl Sleepy {
    pub fn new(id: &str, delay: Duration) -> Self {
        Self {
            profile: AgentProfile::local(id),
            delay,
        }
    }
}

#[async_trait::async_trait]
impl<G: GameDefinition> Agent<G> for Sleepy {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }
    async fn decide(
        &mut self,
        input: &DecideInput<'_, G>,
    ) -> Result<Decision<G::Action>, AgentError> {
        tokio::time::sleep(self.delay).await;
        input
            .legal_actions
            .first()
            .cloned()
            .map(Decision::of)
            .ok_or_else(|| AgentError("no legal actions".to_string()))
    }
}

/// Fails every decision.
pub struct Failing {
    profile: AgentProfile,
}

impl Failing {
    pub fn new(id: &str) -> Self {
        Self {
            profile: AgentProfile::local(id),
        }
    }
}

#[async_trait::async_trait]
impl<G: GameDefinition> Agent<G> for Failing {
    fn profile(&self) -> &AgentProfile {
        &self.profile
    }
    async fn decide(
        &mut self,
        _input: &DecideInput<'_, G>,
    ) -> Result<Decision<G::Action>, AgentError> {
        Err(AgentError("synthetic agent failure\x07".to_string()))
    }
}
