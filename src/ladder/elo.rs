use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// K-factor determines how much ratings change after each match.
/// Higher K = more volatile ratings, lower K = more stable ratings.
const K_FACTOR: f64 = 32.0;
const INITIAL_RATING: i32 = 1500;

#[derive(Debug, Clone, Copy)]
pub struct EloConfig {
    pub k: f64,
    pub initial: i32,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k: K_FACTOR,
            initial: INITIAL_RATING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EloEntry {
    pub id: String,
    pub rating: i32,
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl EloEntry {
    fn fresh(id: &str, rating: i32) -> Self {
        Self {
            id: id.to_string(),
            rating,
            matches: 0,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }
}

/// Outcome of one 1v1 match, from seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    WinA,
    WinB,
    Draw,
}

impl Outcome {
    fn score_a(self) -> f64 {
        match self {
            Outcome::WinA => 1.0,
            Outcome::Draw => 0.5,
            Outcome::WinB => 0.0,
        }
    }
}

/// Shared rating table. The only shared mutable state in a tournament:
/// `record` performs the expected-score read and both rating writes inside
/// one critical section so concurrent matches cannot interleave updates.
#[derive(Debug)]
pub struct EloTable {
    config: EloConfig,
    entries: Mutex<BTreeMap<String, EloEntry>>,
}

impl EloTable {
    pub fn new(config: EloConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// expected score of a rated `ra` against `rb`
    pub fn expected(ra: i32, rb: i32) -> f64 {
        1.0 / (1.0 + 10f64.powf((rb - ra) as f64 / 400.0))
    }

    pub fn record(&self, a: &str, b: &str, outcome: Outcome) {
        let mut entries = self.entries.lock().expect("elo table lock");
        let initial = self.config.initial;
        let ra = entries
            .entry(a.to_string())
            .or_insert_with(|| EloEntry::fresh(a, initial))
            .rating;
        let rb = entries
            .entry(b.to_string())
            .or_insert_with(|| EloEntry::fresh(b, initial))
            .rating;
        let actual = outcome.score_a();
        let delta = (self.config.k * (actual - Self::expected(ra, rb))).round() as i32;
        let entry_a = entries.get_mut(a).expect("inserted above");
        entry_a.rating += delta;
        entry_a.matches += 1;
        match outcome {
            Outcome::WinA => entry_a.wins += 1,
            Outcome::WinB => entry_a.losses += 1,
            Outcome::Draw => entry_a.draws += 1,
        }
        let entry_b = entries.get_mut(b).expect("inserted above");
        entry_b.rating -= delta;
        entry_b.matches += 1;
        match outcome {
            Outcome::WinA => entry_b.losses += 1,
            Outcome::WinB => entry_b.wins += 1,
            Outcome::Draw => entry_b.draws += 1,
        }
    }

    pub fn get(&self, id: &str) -> Option<EloEntry> {
        self.entries.lock().expect("elo table lock").get(id).cloned()
    }

    /// entries sorted by rating descending, id ascending on ties
    pub fn standings(&self) -> Vec<EloEntry> {
        let entries = self.entries.lock().expect("elo table lock");
        let mut standings = entries.values().cloned().collect::<Vec<EloEntry>>();
        standings.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        standings
    }
}
