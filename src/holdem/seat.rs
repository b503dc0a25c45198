use super::position::Position;
use crate::cards::Card;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Waiting,
    Acted,
    AllIn,
    Folded,
    SittingOut,
}

/// One seat's hand-local state. `bet` is the current street, the invested
/// total spans the whole hand; both only ever grow through `put`.
#[derive(Debug, Clone)]
pub struct Seat {
    pub index: usize,
    pub chips: Chips,
    pub hole: Option<[Card; 2]>,
    pub bet: Chips,
    pub total_invested: Chips,
    pub status: SeatStatus,
    pub has_acted: bool,
    pub position: Option<Position>,
    pub is_button: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

impl Seat {
    pub fn buy_in(index: usize, chips: Chips) -> Self {
        Self {
            index,
            chips,
            hole: None,
            bet: 0,
            total_invested: 0,
            status: SeatStatus::Waiting,
            has_acted: false,
            position: None,
            is_button: false,
            is_small_blind: false,
            is_big_blind: false,
        }
    }

    pub fn reset_for_hand(&mut self) {
        self.hole = None;
        self.bet = 0;
        self.total_invested = 0;
        self.has_acted = false;
        self.position = None;
        self.is_button = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.status = match self.chips {
            0 => SeatStatus::SittingOut,
            _ => SeatStatus::Waiting,
        };
    }

    /// move chips into the current bet, capped at the stack; an exhausted
    /// stack is all in
    pub fn put(&mut self, amount: Chips) -> Chips {
        let amount = std::cmp::min(amount, self.chips);
        self.chips -= amount;
        self.bet += amount;
        self.total_invested += amount;
        if self.chips == 0 {
            self.status = SeatStatus::AllIn;
        }
        amount
    }

    /// dealt into the hand and not yet folded
    pub fn is_contesting(&self) -> bool {
        !matches!(self.status, SeatStatus::Folded | SeatStatus::SittingOut)
    }

    /// still able to make decisions this hand
    pub fn is_actionable(&self) -> bool {
        matches!(self.status, SeatStatus::Waiting | SeatStatus::Acted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_moves_chips_into_the_bet() {
        let mut seat = Seat::buy_in(0, 100);
        assert_eq!(seat.put(30), 30);
        assert_eq!(seat.chips, 70);
        assert_eq!(seat.bet, 30);
        assert_eq!(seat.total_invested, 30);
        assert_eq!(seat.status, SeatStatus::Waiting);
    }

    #[test]
    fn put_caps_at_the_stack_and_goes_all_in() {
        let mut seat = Seat::buy_in(0, 25);
        assert_eq!(seat.put(40), 25);
        assert_eq!(seat.chips, 0);
        assert_eq!(seat.bet, 25);
        assert_eq!(seat.status, SeatStatus::AllIn);
        assert!(!seat.is_actionable());
        assert!(seat.is_contesting());
    }

    #[test]
    fn busted_seats_sit_out_the_next_hand() {
        let mut seat = Seat::buy_in(0, 25);
        seat.put(25);
        seat.reset_for_hand();
        assert_eq!(seat.status, SeatStatus::SittingOut);
        assert!(!seat.is_contesting());
    }
}
