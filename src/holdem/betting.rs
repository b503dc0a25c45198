use crate::cards::Street;
use crate::Chips;
use serde::Serialize;

/// Street-scoped betting facts. `min_raise` is the minimum raise *delta*:
/// the larger of the big blind and the last full raise, which is what the
/// next raise must clear on top of `current_bet`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BettingState {
    pub street: Street,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub last_raiser: Option<usize>,
    pub num_raises: usize,
    pub pot_before_street: Chips,
}

impl BettingState {
    /// preflop opening state: blinds set the bet to match
    pub fn preflop(big_blind: Chips) -> Self {
        Self {
            street: Street::Preflop,
            current_bet: big_blind,
            min_raise: big_blind,
            last_raiser: None,
            num_raises: 0,
            pot_before_street: 0,
        }
    }

    /// fresh street: no standing bet, minimum raise resets to the blind
    pub fn advance(&mut self, street: Street, pot_before_street: Chips, big_blind: Chips) {
        self.street = street;
        self.current_bet = 0;
        self.min_raise = big_blind;
        self.last_raiser = None;
        self.num_raises = 0;
        self.pot_before_street = pot_before_street;
    }
}
