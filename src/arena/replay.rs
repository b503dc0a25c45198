use super::event::MatchEvent;
use crate::game::GameDefinition;
use crate::hashing;
use crate::rng::Rng;

/// One discrepancy between a log and its reconstruction. The verifier
/// accumulates every finding rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("missing {0} event")]
    MissingEvent(&'static str),
    #[error("seed reveal does not match commitment")]
    SeedMismatch,
    #[error("observation hash mismatch at turn {turn}")]
    ObservationHashMismatch { turn: usize },
    #[error("illegal action at turn {turn}")]
    ActionIllegal { turn: usize },
    #[error("results do not match replayed outcome")]
    ResultsMismatch,
    #[error("state error at turn {turn}: {message}")]
    StateError { turn: usize, message: String },
}

#[derive(Debug, Clone, Copy)]
pub struct ReplayOptions {
    /// Observation hashes are part of the determinism contract, but some
    /// schemas embed externally-supplied data that does not canonicalize;
    /// callers may opt out of the hash comparison for those.
    pub check_observations: bool,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self {
            check_observations: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Replay {
    pub success: bool,
    pub match_id: Option<String>,
    pub errors: Vec<ReplayError>,
    pub turns_verified: usize,
    pub total_turns: usize,
}

/// Reconstruct a match from its event log and cross-check every claim the
/// log makes: the seed commitment, each pre-step observation hash, the
/// legality of each recorded action, and the final results. Because the
/// RNG is deterministic and `step` is pure in its arguments, any
/// discrepancy is a discipline bug or a tampered log. Per-turn game
/// annotations are discipline-authored and are not verified. Read-only.
pub fn verify_replay<G: GameDefinition>(
    game: &G,
    events: &[MatchEvent],
    opts: ReplayOptions,
) -> Replay {
    let mut errors = Vec::new();
    let total_turns = events.iter().filter(|e| e.is_turn()).count();

    let start = events.iter().find_map(|e| match e {
        MatchEvent::MatchStart {
            match_id,
            agents,
            seed_commit,
            config,
            ..
        } => Some((match_id.clone(), agents.len(), seed_commit, config)),
        _ => None,
    });
    let end = events.iter().find_map(|e| match e {
        MatchEvent::MatchEnd {
            seed_reveal,
            results,
            total_turns,
            ..
        } => Some((seed_reveal, results, *total_turns)),
        _ => None,
    });
    if start.is_none() {
        errors.push(ReplayError::MissingEvent("MATCH_START"));
    }
    if end.is_none() {
        errors.push(ReplayError::MissingEvent("MATCH_END"));
    }
    let (Some((match_id, players, seed_commit, config)), Some((seed, logged_results, end_turns))) =
        (start, end)
    else {
        return Replay {
            success: false,
            match_id: None,
            errors,
            turns_verified: 0,
            total_turns,
        };
    };

    if !hashing::verify(seed, seed_commit) {
        errors.push(ReplayError::SeedMismatch);
    }
    if end_turns != total_turns {
        errors.push(ReplayError::StateError {
            turn: total_turns,
            message: format!(
                "log holds {} turns but the end event claims {}",
                total_turns, end_turns
            ),
        });
    }

    let config = match config {
        Some(value) => match serde_json::from_value::<G::Config>(value.clone()) {
            Ok(config) => config,
            Err(e) => {
                errors.push(ReplayError::StateError {
                    turn: 0,
                    message: format!("undecodable config: {}", e),
                });
                return Replay {
                    success: false,
                    match_id: Some(match_id),
                    errors,
                    turns_verified: 0,
                    total_turns,
                };
            }
        },
        None => G::Config::default(),
    };
    let mut rng = Rng::new(seed);
    let mut state = match game.reset(seed, players, &config) {
        Ok(state) => state,
        Err(e) => {
            errors.push(ReplayError::StateError {
                turn: 0,
                message: e.to_string(),
            });
            return Replay {
                success: false,
                match_id: Some(match_id),
                errors,
                turns_verified: 0,
                total_turns,
            };
        }
    };

    let mut turns_verified = 0usize;
    let mut expected_index = 0usize;
    let mut halted = false;
    for event in events {
        let MatchEvent::Turn {
            turn_index,
            player_index,
            observation_hash,
            action,
            illegal_action,
            ..
        } = event
        else {
            continue;
        };
        if *turn_index != expected_index {
            errors.push(ReplayError::StateError {
                turn: expected_index,
                message: format!("turn index {} out of order", turn_index),
            });
        }
        expected_index += 1;
        let pid = *player_index;

        if opts.check_observations {
            let observation = game.observe(&state, pid);
            match hashing::canonical_hash(&observation) {
                Ok(hash) if hash == *observation_hash => {}
                Ok(_) => errors.push(ReplayError::ObservationHashMismatch { turn: *turn_index }),
                Err(e) => errors.push(ReplayError::StateError {
                    turn: *turn_index,
                    message: format!("unhashable observation: {}", e),
                }),
            }
        }

        let legal = game.legal_actions(&state, pid);
        let member = match hashing::canonical(action) {
            Ok(canon) => legal.iter().any(|candidate| {
                hashing::canonical(candidate)
                    .map(|c| c == canon)
                    .unwrap_or(false)
            }),
            Err(_) => false,
        };
        if !member && !*illegal_action {
            errors.push(ReplayError::ActionIllegal { turn: *turn_index });
        }

        let action = match serde_json::from_value::<G::Action>(action.clone()) {
            Ok(action) => action,
            Err(e) => {
                errors.push(ReplayError::StateError {
                    turn: *turn_index,
                    message: format!("undecodable action: {}", e),
                });
                halted = true;
                break;
            }
        };
        match game.step(&state, pid, &action, &mut rng) {
            Ok(step) => {
                state = step.state;
                turns_verified += 1;
            }
            Err(e) => {
                errors.push(ReplayError::StateError {
                    turn: *turn_index,
                    message: e.to_string(),
                });
                halted = true;
                break;
            }
        }
    }

    if !halted {
        if game.is_terminal(&state) {
            match game.results(&state) {
                Ok(actual) => {
                    let actual = hashing::canonical_hash(&actual).ok();
                    let logged = hashing::canonical_hash(logged_results).ok();
                    if actual.is_none() || actual != logged {
                        errors.push(ReplayError::ResultsMismatch);
                    }
                }
                Err(e) => errors.push(ReplayError::StateError {
                    turn: turns_verified,
                    message: e.to_string(),
                }),
            }
        } else {
            errors.push(ReplayError::StateError {
                turn: turns_verified,
                message: "log ended before a terminal state".to_string(),
            });
        }
    }

    Replay {
        success: errors.is_empty(),
        match_id: Some(match_id),
        errors,
        turns_verified,
        total_turns,
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::super::orchestrator::run_match;
    use super::super::orchestrator::MatchOptions;
    use super::*;
    use crate::agent::Agent;

    async fn counting_log(seed: &str) -> Vec<MatchEvent> {
        let game = Counting::rounds(2);
        let mut a = Scripted::new("a", vec![1, 3]);
        let mut b = Scripted::new("b", vec![2, 1]);
        let mut seats: [&mut dyn Agent<Counting>; 2] = [&mut a, &mut b];
        run_match(&game, &mut seats, MatchOptions::seeded(seed))
            .await
            .unwrap()
            .events
    }

    #[tokio::test]
    async fn honest_log_verifies() {
        let events = counting_log("honest").await;
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(replay.success, "unexpected errors: {:?}", replay.errors);
        assert_eq!(replay.turns_verified, 4);
        assert_eq!(replay.total_turns, 4);
    }

    #[tokio::test]
    async fn honest_log_with_misbehaving_agents_verifies() {
        let game = Counting::rounds(1);
        let mut cheat = Scripted::new("cheat", vec![999]);
        let mut b = Scripted::new("b", vec![2]);
        let mut seats: [&mut dyn Agent<Counting>; 2] = [&mut cheat, &mut b];
        let events = run_match(&game, &mut seats, MatchOptions::seeded("misbehave"))
            .await
            .unwrap()
            .events;
        let replay = verify_replay(&Counting::rounds(1), &events, ReplayOptions::default());
        assert!(replay.success, "unexpected errors: {:?}", replay.errors);
    }

    #[tokio::test]
    async fn tampered_action_is_caught_as_illegal() {
        let mut events = counting_log("tamper-illegal").await;
        for event in events.iter_mut() {
            if let MatchEvent::Turn { action, .. } = event {
                *action = serde_json::json!(999);
                break;
            }
        }
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay
            .errors
            .contains(&ReplayError::ActionIllegal { turn: 0 }));
    }

    #[tokio::test]
    async fn tampered_but_legal_action_shifts_the_results() {
        let mut events = counting_log("tamper-legal").await;
        for event in events.iter_mut() {
            if let MatchEvent::Turn { action, .. } = event {
                // swap to a different but still-legal move
                *action = serde_json::json!(2);
                break;
            }
        }
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay.errors.contains(&ReplayError::ResultsMismatch));
    }

    #[tokio::test]
    async fn tampered_observation_hash_is_caught() {
        let mut events = counting_log("tamper-hash").await;
        for event in events.iter_mut() {
            if let MatchEvent::Turn {
                observation_hash, ..
            } = event
            {
                *observation_hash = "00".repeat(32);
                break;
            }
        }
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay
            .errors
            .contains(&ReplayError::ObservationHashMismatch { turn: 0 }));
        let relaxed = verify_replay(
            &Counting::rounds(2),
            &events,
            ReplayOptions {
                check_observations: false,
            },
        );
        assert!(relaxed.success);
    }

    #[tokio::test]
    async fn tampered_seed_reveal_is_caught() {
        let mut events = counting_log("tamper-seed").await;
        for event in events.iter_mut() {
            if let MatchEvent::MatchEnd { seed_reveal, .. } = event {
                *seed_reveal = "someone-elses-seed".to_string();
            }
        }
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay.errors.contains(&ReplayError::SeedMismatch));
    }

    #[tokio::test]
    async fn tampered_results_are_caught() {
        let mut events = counting_log("tamper-results").await;
        for event in events.iter_mut() {
            if let MatchEvent::MatchEnd { results, .. } = event {
                results.players[0].score += 100.0;
            }
        }
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay.errors.contains(&ReplayError::ResultsMismatch));
    }

    #[tokio::test]
    async fn missing_end_event_is_caught() {
        let mut events = counting_log("truncated").await;
        events.pop();
        let replay = verify_replay(&Counting::rounds(2), &events, ReplayOptions::default());
        assert!(!replay.success);
        assert!(replay
            .errors
            .contains(&ReplayError::MissingEvent("MATCH_END")));
    }

    #[tokio::test]
    async fn rps_log_verifies_without_observation_leaks() {
        let game = Rps;
        let mut a = Rock::new("a");
        let mut b = Rock::new("b");
        let mut seats: [&mut dyn Agent<Rps>; 2] = [&mut a, &mut b];
        let events = run_match(&game, &mut seats, MatchOptions::seeded("rps-replay"))
            .await
            .unwrap()
            .events;
        let replay = verify_replay(&Rps, &events, ReplayOptions::default());
        assert!(replay.success, "unexpected errors: {:?}", replay.errors);
    }
}
