use super::pot::build_pots;
use super::pot::Pot;
use super::seat::Seat;
use crate::cards::evaluate7;
use crate::cards::Card;
use crate::cards::Strength;
use crate::game::GameError;
use crate::Chips;
use std::collections::BTreeMap;

/// What one pot paid out.
#[derive(Debug, Clone)]
pub struct PotAward {
    pub pot: Pot,
    pub winners: Vec<usize>,
    pub share: Chips,
}

/// Full showdown resolution: per-seat winnings plus the revealed
/// strengths, pot by pot.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub payouts: Vec<Chips>,
    pub awards: Vec<PotAward>,
    pub strengths: BTreeMap<usize, Strength>,
}

/// Resolve every pot in creation order: evaluate each eligible seat's best
/// 5-of-7, split ties equally, and hand any odd chips to the tied winner
/// in the earliest seat.
pub fn settle(seats: &[Seat], board: &[Card]) -> Result<Settlement, GameError> {
    if board.len() != 5 {
        return Err(GameError::State(format!(
            "showdown on a {}-card board",
            board.len()
        )));
    }
    let mut strengths = BTreeMap::new();
    for seat in seats.iter().filter(|s| s.is_contesting()) {
        let hole = seat
            .hole
            .ok_or_else(|| GameError::State(format!("seat {} contesting without cards", seat.index)))?;
        let mut seven = [hole[0]; 7];
        seven[..2].copy_from_slice(&hole);
        seven[2..].copy_from_slice(board);
        strengths.insert(seat.index, evaluate7(&seven));
    }

    let mut payouts = vec![0; seats.len()];
    let mut awards = Vec::new();
    for pot in build_pots(seats) {
        let best = pot
            .eligible
            .iter()
            .filter_map(|p| strengths.get(p))
            .max()
            .cloned()
            .ok_or_else(|| GameError::State("pot with no eligible hands".to_string()))?;
        let winners = pot
            .eligible
            .iter()
            .copied()
            .filter(|p| strengths.get(p) == Some(&best))
            .collect::<Vec<usize>>();
        let share = pot.amount / winners.len() as Chips;
        let remainder = pot.amount % winners.len() as Chips;
        for &winner in &winners {
            payouts[winner] += share;
        }
        payouts[winners[0]] += remainder;
        awards.push(PotAward {
            pot,
            winners,
            share,
        });
    }
    Ok(Settlement {
        payouts,
        awards,
        strengths,
    })
}
