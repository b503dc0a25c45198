use super::elo::EloConfig;
use super::elo::EloEntry;
use super::elo::EloTable;
use super::elo::Outcome;
use crate::agent::Agent;
use crate::arena::run_match;
use crate::arena::MatchError;
use crate::arena::MatchOptions;
use crate::game::GameDefinition;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct LadderConfig {
    pub base_seed: String,
    pub matches_per_pair: usize,
    pub turn_timeout: Duration,
    pub elo: EloConfig,
}

impl LadderConfig {
    pub fn seeded(base_seed: &str) -> Self {
        Self {
            base_seed: base_seed.to_string(),
            matches_per_pair: 2,
            turn_timeout: crate::TURN_TIMEOUT,
            elo: EloConfig::default(),
        }
    }
    pub fn with_matches_per_pair(mut self, matches_per_pair: usize) -> Self {
        self.matches_per_pair = matches_per_pair;
        self
    }
    pub fn with_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }
}

/// One entry of the round-robin schedule: which agents sit in which seat,
/// and the seed that match runs under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledMatch {
    pub seats: [usize; 2],
    pub seed: String,
}

/// Enumerate `{(i, j) : i < j}` in lexicographic order with
/// `matches_per_pair` meetings per pair, alternating seating every other
/// meeting. The seed concatenates base seed, both ids in pair order, and
/// the meeting number, and doubles as the match id -- so the whole
/// tournament is a pure function of `(base seed, agents, config)`.
pub fn schedule(ids: &[String], matches_per_pair: usize, base_seed: &str) -> Vec<ScheduledMatch> {
    let mut scheduled = Vec::new();
    for i in 0..ids.len() {
        for j in i + 1..ids.len() {
            for n in 0..matches_per_pair {
                scheduled.push(ScheduledMatch {
                    seats: match n % 2 {
                        0 => [i, j],
                        _ => [j, i],
                    },
                    seed: format!("{}:{}:{}:{}", base_seed, ids[i], ids[j], n),
                });
            }
        }
    }
    scheduled
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub match_id: String,
    pub seats: [String; 2],
    pub winner: Option<String>,
    pub is_draw: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LadderReport {
    pub standings: Vec<EloEntry>,
    pub matches: Vec<MatchRecord>,
}

/// Run the full round-robin and feed every outcome into a shared Elo
/// table. Matches run sequentially here; callers wanting cross-match
/// parallelism can drive `schedule` themselves, as long as each match
/// owns its state and the Elo table stays the single shared structure.
pub async fn run_ladder<G: GameDefinition>(
    game: &G,
    agents: &mut [Box<dyn Agent<G>>],
    config: LadderConfig,
    game_config: G::Config,
) -> Result<LadderReport, MatchError> {
    if agents.len() < 2 {
        return Err(MatchError::InvalidConfiguration(
            "a ladder needs at least two agents".to_string(),
        ));
    }
    if !game.players().supports(2) {
        return Err(MatchError::InvalidConfiguration(format!(
            "{} cannot host 1v1 ladder matches",
            game.id()
        )));
    }
    let ids = agents
        .iter()
        .map(|a| a.profile().id.clone())
        .collect::<Vec<String>>();
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    if unique.len() != ids.len() {
        return Err(MatchError::InvalidConfiguration(
            "ladder agent ids must be unique".to_string(),
        ));
    }

    let table = EloTable::new(config.elo);
    let mut records = Vec::new();
    for scheduled in schedule(&ids, config.matches_per_pair, &config.base_seed) {
        let record =
            run_scheduled(game, agents, &scheduled, &config, &game_config, &table).await?;
        records.push(record);
    }
    Ok(LadderReport {
        standings: table.standings(),
        matches: records,
    })
}

/// Run one scheduled ladder match and record its outcome atomically.
pub async fn run_scheduled<G: GameDefinition>(
    game: &G,
    agents: &mut [Box<dyn Agent<G>>],
    scheduled: &ScheduledMatch,
    config: &LadderConfig,
    game_config: &G::Config,
    table: &EloTable,
) -> Result<MatchRecord, MatchError> {
    let [s0, s1] = scheduled.seats;
    let (lo, hi) = agents.split_at_mut(std::cmp::max(s0, s1));
    let (first, second): (&mut dyn Agent<G>, &mut dyn Agent<G>) = match s0 < s1 {
        true => (lo[s0].as_mut(), hi[0].as_mut()),
        false => (hi[0].as_mut(), lo[s1].as_mut()),
    };
    let id0 = first.profile().id.clone();
    let id1 = second.profile().id.clone();
    let mut seats: [&mut dyn Agent<G>; 2] = [first, second];
    let opts = MatchOptions::<G>::seeded(&scheduled.seed)
        .with_match_id(&scheduled.seed)
        .with_timeout(config.turn_timeout)
        .with_config(game_config.clone());
    let report = run_match(game, &mut seats, opts).await?;

    let outcome = match (report.results.is_draw, report.results.winner) {
        (false, Some(0)) => Outcome::WinA,
        (false, Some(_)) => Outcome::WinB,
        _ => Outcome::Draw,
    };
    table.record(&id0, &id1, outcome);
    let winner = match outcome {
        Outcome::WinA => Some(id0.clone()),
        Outcome::WinB => Some(id1.clone()),
        Outcome::Draw => None,
    };
    log::info!(
        "[ladder] {} vs {} -> {}",
        id0,
        id1,
        winner.as_deref().unwrap_or("draw")
    );
    Ok(MatchRecord {
        match_id: report.match_id,
        seats: [id0, id1],
        winner,
        is_draw: outcome == Outcome::Draw,
    })
}
