use super::error::MatchError;
use super::event::AgentSummary;
use super::event::MatchEvent;
use super::report::MatchReport;
use crate::agent::sanitize_reason;
use crate::agent::Agent;
use crate::agent::Clock;
use crate::agent::DecideInput;
use crate::agent::TurnMeta;
use crate::game::GameDefinition;
use crate::game::GameError;
use crate::hashing;
use crate::rng::Rng;
use serde::Serialize;
use std::time::Duration;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Knobs for one match. Everything except the seed has a sane default.
pub struct MatchOptions<G: GameDefinition> {
    pub match_id: Option<String>,
    pub seed: String,
    pub turn_timeout: Duration,
    pub config: G::Config,
    pub events: Option<UnboundedSender<MatchEvent>>,
}

impl<G: GameDefinition> MatchOptions<G> {
    pub fn seeded(seed: &str) -> Self {
        Self {
            match_id: None,
            seed: seed.to_string(),
            turn_timeout: crate::TURN_TIMEOUT,
            config: G::Config::default(),
            events: None,
        }
    }
    pub fn with_match_id(mut self, match_id: &str) -> Self {
        self.match_id = Some(match_id.to_string());
        self
    }
    pub fn with_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }
    pub fn with_config(mut self, config: G::Config) -> Self {
        self.config = config;
        self
    }
    /// Event sink invoked synchronously, in emission order, before the
    /// turn loop advances.
    pub fn with_channel(mut self, events: UnboundedSender<MatchEvent>) -> Self {
        self.events = Some(events);
        self
    }
}

/// Owns the ordered event stream and mirrors it into the optional sink.
struct Emitter {
    sink: Option<UnboundedSender<MatchEvent>>,
    events: Vec<MatchEvent>,
}

impl Emitter {
    fn emit(&mut self, event: MatchEvent) {
        if let Some(sink) = &self.sink {
            let _ = sink.send(event.clone());
        }
        self.events.push(event);
    }
}

/// Run one match to completion.
///
/// The loop is strictly sequential: ask the game who acts, observe, offer
/// the legal actions to that agent under the soft deadline, validate what
/// comes back, step, emit. Agent misbehavior -- timeout, failure, or an
/// action outside the legal set -- is recovered by substituting the first
/// legal action and recording what happened on the turn event. Only a
/// failing `step` (a discipline bug) aborts the match.
pub async fn run_match<G: GameDefinition>(
    game: &G,
    agents: &mut [&mut dyn Agent<G>],
    opts: MatchOptions<G>,
) -> Result<MatchReport, MatchError> {
    let players = agents.len();
    if !game.players().supports(players) {
        return Err(MatchError::InvalidConfiguration(format!(
            "{} does not support {} players",
            game.id(),
            players
        )));
    }
    let match_id = opts
        .match_id
        .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
    let seed_commit = hashing::commit(&opts.seed);
    let mut rng = Rng::new(&opts.seed);
    let summaries = agents
        .iter()
        .map(|a| AgentSummary::from(a.profile()))
        .collect::<Vec<AgentSummary>>();
    let config_json = serde_json::to_value(&opts.config)?;
    let started = Instant::now();
    let mut emitter = Emitter {
        sink: opts.events,
        events: Vec::new(),
    };

    log::info!("[{}] starting {} v{}", match_id, game.id(), game.version());
    emitter.emit(MatchEvent::MatchStart {
        match_id: match_id.clone(),
        started_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        game_id: game.id().to_string(),
        game_version: game.version().to_string(),
        agents: summaries.clone(),
        seed_commit: seed_commit.clone(),
        config: match config_json {
            serde_json::Value::Null => None,
            config => Some(config),
        },
    });

    let mut state = game
        .reset(&opts.seed, players, &opts.config)
        .map_err(|e| MatchError::InvalidConfiguration(e.to_string()))?;

    let mut turn_index = 0usize;
    loop {
        if game.is_terminal(&state) {
            break;
        }
        let Some(pid) = game.current_player(&state) else {
            break;
        };
        let observation = game.observe(&state, pid);
        let legal = game.legal_actions(&state, pid);
        if legal.is_empty() {
            let source = GameError::State(format!("player {} to act with no legal actions", pid));
            return Err(MatchError::GameStepFailed {
                turn: turn_index,
                source,
                events: emitter.events,
            });
        }
        let observation_hash = hashing::canonical_hash(&observation)?;

        let input = DecideInput::<G> {
            match_id: &match_id,
            game_id: game.id(),
            game_version: game.version(),
            player_index: pid,
            observation: &observation,
            legal_actions: &legal,
            clock: Clock {
                turn_timeout_ms: opts.turn_timeout.as_millis() as u64,
            },
            meta: TurnMeta {
                turn_index,
                hand_number: game.hand_number(&state),
            },
        };

        let clock = Instant::now();
        let mut timed_out = false;
        let decided = match tokio::time::timeout(opts.turn_timeout, agents[pid].decide(&input)).await
        {
            Ok(Ok(decision)) => {
                if let Some(ref reason) = decision.reason {
                    log::debug!("[{}] P{} reasons: {}", match_id, pid, sanitize_reason(reason));
                }
                Some(decision.action)
            }
            Ok(Err(e)) => {
                log::warn!(
                    "[{}] P{} failed at turn {}: {}",
                    match_id,
                    pid,
                    turn_index,
                    sanitize_reason(&e.to_string())
                );
                None
            }
            Err(_) => {
                // deadline elapsed: the in-flight future is dropped here,
                // its eventual answer discarded
                timed_out = true;
                log::warn!("[{}] P{} timed out at turn {}", match_id, pid, turn_index);
                None
            }
        };
        let timing_ms = clock.elapsed().as_millis() as u64;

        let mut illegal_action = false;
        let mut original_action = None;
        let action = match decided {
            Some(action) if is_member(&action, &legal)? => action,
            Some(action) => {
                illegal_action = true;
                original_action = Some(serde_json::to_value(&action)?);
                log::warn!(
                    "[{}] P{} played an illegal action at turn {}",
                    match_id,
                    pid,
                    turn_index
                );
                legal[0].clone()
            }
            None if timed_out => legal[0].clone(),
            None => {
                illegal_action = true;
                legal[0].clone()
            }
        };

        match game.step(&state, pid, &action, &mut rng) {
            Ok(step) => {
                state = step.state;
                emitter.emit(MatchEvent::Turn {
                    turn_index,
                    player_index: pid,
                    observation_hash,
                    action: serde_json::to_value(&action)?,
                    timing_ms,
                    timed_out,
                    illegal_action,
                    original_action,
                    events: match step.events.is_empty() {
                        true => None,
                        false => Some(step.events),
                    },
                });
            }
            Err(source) => {
                // the failing step left `state` untouched, so this is the
                // last good state; emit a best-effort end event if the
                // game can still report standings from it, then fail
                if let Ok(results) = game.results(&state) {
                    emitter.emit(MatchEvent::MatchEnd {
                        seed_reveal: opts.seed.clone(),
                        results,
                        total_turns: turn_index,
                        total_time_ms: started.elapsed().as_millis() as u64,
                    });
                }
                return Err(MatchError::GameStepFailed {
                    turn: turn_index,
                    source,
                    events: emitter.events,
                });
            }
        }
        turn_index += 1;
    }

    let results = match game.results(&state) {
        Ok(results) => results,
        Err(source) => {
            return Err(MatchError::GameStepFailed {
                turn: turn_index,
                source,
                events: emitter.events,
            })
        }
    };
    let total_time_ms = started.elapsed().as_millis() as u64;
    emitter.emit(MatchEvent::MatchEnd {
        seed_reveal: opts.seed.clone(),
        results: results.clone(),
        total_turns: turn_index,
        total_time_ms,
    });
    log::info!(
        "[{}] finished after {} turns in {}ms",
        match_id,
        turn_index,
        total_time_ms
    );

    Ok(MatchReport {
        match_id,
        game_id: game.id().to_string(),
        game_version: game.version().to_string(),
        seed: opts.seed,
        seed_commit,
        agents: summaries,
        results,
        events: emitter.events,
        total_turns: turn_index,
        total_time_ms,
    })
}

/// Membership by canonical encoding: the orchestrator never inspects an
/// action, it only checks the agent returned one of the offered ones.
fn is_member<A: Serialize>(action: &A, legal: &[A]) -> Result<bool, serde_json::Error> {
    let canon = hashing::canonical(action)?;
    for candidate in legal {
        if hashing::canonical(candidate)? == canon {
            return Ok(true);
        }
    }
    Ok(false)
}
