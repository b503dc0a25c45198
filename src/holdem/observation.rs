use super::seat::Seat;
use super::seat::SeatStatus;
use super::table::Table;
use crate::cards::Card;
use crate::cards::Street;
use crate::holdem::position::Position;
use crate::Chips;
use serde::Serialize;

/// Public view of one seat: everything except the cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub index: usize,
    pub chips: Chips,
    pub bet: Chips,
    pub total_invested: Chips,
    pub status: SeatStatus,
    pub has_acted: bool,
    pub position: Option<Position>,
    pub is_button: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            index: seat.index,
            chips: seat.chips,
            bet: seat.bet,
            total_invested: seat.total_invested,
            status: seat.status,
            has_acted: seat.has_acted,
            position: seat.position,
            is_button: seat.is_button,
            is_small_blind: seat.is_small_blind,
            is_big_blind: seat.is_big_blind,
        }
    }
}

/// What one seat is allowed to know: the board, the betting state, every
/// seat's public fields, and its own hole cards. Other seats' cards and
/// the undealt deck never appear here, which is what makes the
/// observation hash a safe replay check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldemObservation {
    pub player_index: usize,
    pub hand_number: usize,
    pub street: Street,
    pub board: Vec<Card>,
    pub hole_cards: Option<[Card; 2]>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub to_call: Chips,
    pub min_raise_to: Chips,
    pub num_raises: usize,
    pub button: usize,
    pub seats: Vec<SeatView>,
}

impl HoldemObservation {
    pub fn of(table: &Table, player: usize) -> Self {
        Self {
            player_index: player,
            hand_number: table.hand_number(),
            street: table.betting().street,
            board: table.board().to_vec(),
            hole_cards: table.seats()[player].hole,
            pot: table.pot_total(),
            current_bet: table.betting().current_bet,
            to_call: table.to_call(player),
            min_raise_to: table.min_raise_to(),
            num_raises: table.betting().num_raises,
            button: table.button(),
            seats: table.seats().iter().map(SeatView::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hashing;
    use crate::holdem::config::HoldemConfig;

    #[test]
    fn observation_shows_only_own_cards() {
        let table = Table::new("privacy", 3, HoldemConfig::default()).unwrap();
        let observation = HoldemObservation::of(&table, 1);
        assert_eq!(observation.hole_cards, table.seats()[1].hole);
        let json = serde_json::to_value(&observation).unwrap();
        for seat in json["seats"].as_array().unwrap() {
            assert!(seat.get("hole").is_none());
            assert!(seat.get("holeCards").is_none());
        }
    }

    #[test]
    fn observation_hash_is_independent_of_hidden_cards() {
        let mut table = Table::new("privacy-hash", 3, HoldemConfig::default()).unwrap();
        let before = hashing::canonical_hash(&HoldemObservation::of(&table, 0)).unwrap();
        // perturb another seat's hidden cards
        let stolen = table.seats()[2].hole.unwrap();
        table.seats_mut()[1].hole = Some(stolen);
        let after = hashing::canonical_hash(&HoldemObservation::of(&table, 0)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn observation_hash_tracks_own_cards() {
        let mut table = Table::new("privacy-own", 3, HoldemConfig::default()).unwrap();
        let before = hashing::canonical_hash(&HoldemObservation::of(&table, 0)).unwrap();
        let stolen = table.seats()[2].hole.unwrap();
        table.seats_mut()[0].hole = Some(stolen);
        let after = hashing::canonical_hash(&HoldemObservation::of(&table, 0)).unwrap();
        assert_ne!(before, after);
    }

    #[test]
    fn derived_amounts_match_the_betting_state() {
        let table = Table::new("derived", 2, HoldemConfig::default()).unwrap();
        let observation = HoldemObservation::of(&table, 0);
        // button posted the 10 small blind and faces the 20 big blind
        assert_eq!(observation.to_call, 10);
        assert_eq!(observation.min_raise_to, 40);
        assert_eq!(observation.pot, 30);
    }
}
