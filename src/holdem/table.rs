use super::action::HoldemAction;
use super::betting::BettingState;
use super::config::HoldemConfig;
use super::position::positions;
use super::seat::Seat;
use super::seat::SeatStatus;
use super::showdown;
use crate::cards::Card;
use crate::cards::Deck;
use crate::cards::Street;
use crate::game::GameError;
use crate::game::GameEvent;
use crate::rng::Rng;
use crate::Chips;
use serde_json::json;

/// Full table state between actions.
///
/// Everything that is not a player decision -- dealing, street
/// transitions, all-in runouts, showdown, blinds, button rotation,
/// elimination -- happens inside `apply`, so the match driver sees one
/// decision per turn and nothing else. Each hand's deck comes from a
/// labeled fork of the match seed (`new-hand:{n}`), leaving the driver's
/// own stream untouched no matter how many hands are played.
#[derive(Debug, Clone)]
pub struct Table {
    seed: String,
    config: HoldemConfig,
    seats: Vec<Seat>,
    button: usize,
    deck: Deck,
    board: Vec<Card>,
    betting: BettingState,
    hand_number: usize,
    to_act: Option<usize>,
    terminal: bool,
}

impl Table {
    pub fn new(seed: &str, players: usize, config: HoldemConfig) -> Result<Self, GameError> {
        config.validate()?;
        let seats = (0..players)
            .map(|i| Seat::buy_in(i, config.starting_chips))
            .collect::<Vec<Seat>>();
        let mut table = Self {
            seed: seed.to_string(),
            deck: Deck::shuffled(&mut Rng::new(seed).fork("new-hand:1")),
            config,
            seats,
            button: 0,
            board: Vec::new(),
            betting: BettingState::preflop(0),
            hand_number: 0,
            to_act: None,
            terminal: false,
        };
        let mut events = Vec::new();
        table.start_hand(&mut events)?;
        Ok(table)
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn betting(&self) -> &BettingState {
        &self.betting
    }
    pub fn button(&self) -> usize {
        self.button
    }
    pub fn hand_number(&self) -> usize {
        self.hand_number
    }
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }
    pub fn config(&self) -> &HoldemConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn seats_mut(&mut self) -> &mut [Seat] {
        &mut self.seats
    }

    /// chips committed to the current hand across all seats
    pub fn pot_total(&self) -> Chips {
        self.seats.iter().map(|s| s.total_invested).sum()
    }

    pub fn to_call(&self, player: usize) -> Chips {
        self.betting
            .current_bet
            .saturating_sub(self.seats[player].bet)
    }

    /// total a minimum raise must reach
    pub fn min_raise_to(&self) -> Chips {
        self.betting.current_bet + self.betting.min_raise
    }
}

// action surface
impl Table {
    /// Every action the seat may take right now, coercion target first:
    /// fold when facing a bet, otherwise check. Bet and raise totals are
    /// enumerated at chip granularity up to (exclusive of) the all-in
    /// total, which is reachable only through `AllIn`.
    pub fn legal_actions(&self, player: usize) -> Vec<HoldemAction> {
        if self.terminal || self.to_act != Some(player) {
            return vec![];
        }
        let seat = &self.seats[player];
        let to_call = self.to_call(player);
        let stack_total = seat.bet + seat.chips;
        let mut actions = Vec::new();
        if to_call > 0 {
            actions.push(HoldemAction::Fold);
        } else {
            actions.push(HoldemAction::Check);
        }
        if to_call > 0 && seat.chips > to_call {
            actions.push(HoldemAction::Call);
        }
        // a seat that already acted may not raise unless a full raise
        // reopened the action
        let may_raise = !seat.has_acted;
        if may_raise {
            if self.betting.current_bet == 0 {
                for amount in self.config.big_blind..stack_total {
                    actions.push(HoldemAction::Bet { amount });
                }
            } else {
                for amount in self.min_raise_to()..stack_total {
                    actions.push(HoldemAction::Raise { amount });
                }
            }
        }
        if seat.chips > 0 {
            let shove_raises = stack_total > self.betting.current_bet;
            if !shove_raises || may_raise {
                actions.push(HoldemAction::AllIn);
            }
        }
        actions
    }

    /// Apply one already-validated action and advance the hand as far as
    /// it goes without another decision.
    pub fn apply(
        &mut self,
        player: usize,
        action: &HoldemAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.terminal {
            return Err(GameError::State("action on a finished match".to_string()));
        }
        if self.to_act != Some(player) {
            return Err(GameError::State(format!("seat {} acting out of turn", player)));
        }
        if !self.legal_actions(player).contains(action) {
            return Err(GameError::State(format!(
                "illegal action reached the table: {:?}",
                action
            )));
        }
        let mut events = Vec::new();
        match *action {
            HoldemAction::Fold => {
                self.seats[player].status = SeatStatus::Folded;
                events.push(GameEvent::with("FOLD", json!({ "seat": player })));
            }
            HoldemAction::Check => self.wager(player, self.seats[player].bet),
            HoldemAction::Call => self.wager(player, self.betting.current_bet),
            HoldemAction::Bet { amount } | HoldemAction::Raise { amount } => {
                self.wager(player, amount)
            }
            HoldemAction::AllIn => {
                let stack_total = self.seats[player].bet + self.seats[player].chips;
                self.wager(player, stack_total)
            }
        }
        self.resolve(player, &mut events)?;
        Ok(events)
    }

    /// Put chips in to reach `target` for the street and update the
    /// betting state. A full raise (delta at or above the minimum)
    /// reopens action for everyone else; a short all-in raises the price
    /// to call without reopening.
    fn wager(&mut self, player: usize, target: Chips) {
        let standing = self.seats[player].bet;
        self.seats[player].put(target - standing);
        self.seats[player].has_acted = true;
        if self.seats[player].status != SeatStatus::AllIn {
            self.seats[player].status = SeatStatus::Acted;
        }
        let current = self.betting.current_bet;
        if target > current {
            let delta = target - current;
            self.betting.current_bet = target;
            if delta >= self.betting.min_raise {
                self.betting.min_raise = delta;
                self.betting.last_raiser = Some(player);
                self.betting.num_raises += 1;
                for seat in self.seats.iter_mut() {
                    if seat.index != player && seat.is_actionable() {
                        seat.has_acted = false;
                        seat.status = SeatStatus::Waiting;
                    }
                }
            }
        }
    }
}

// hand flow
impl Table {
    fn start_hand(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.hand_number += 1;
        if self.hand_number > 1 {
            self.button = self
                .next_funded(self.button)
                .ok_or_else(|| GameError::State("no funded seat for the button".to_string()))?;
        }
        let mut rng = Rng::new(&self.seed).fork(&format!("new-hand:{}", self.hand_number));
        self.deck = Deck::shuffled(&mut rng);
        self.board.clear();
        for seat in self.seats.iter_mut() {
            seat.reset_for_hand();
        }
        self.assign_positions()?;
        self.deal_holes()?;
        let small_blind = self.blind_seat(|s| s.is_small_blind)?;
        let big_blind = self.blind_seat(|s| s.is_big_blind)?;
        self.seats[small_blind].put(self.config.small_blind);
        self.seats[big_blind].put(self.config.big_blind);
        self.betting = BettingState::preflop(self.config.big_blind);
        self.resolve(big_blind, events)
    }

    /// label the live ring by offset from the button; heads-up the button
    /// posts the small blind
    fn assign_positions(&mut self) -> Result<(), GameError> {
        let ring = self.live_ring();
        let labels = positions(ring.len());
        if labels.is_empty() {
            return Err(GameError::State(format!(
                "cannot seat {} live players",
                ring.len()
            )));
        }
        let heads_up = ring.len() == 2;
        for (offset, &index) in ring.iter().enumerate() {
            let seat = &mut self.seats[index];
            seat.position = Some(labels[offset]);
            seat.is_button = offset == 0;
            seat.is_small_blind = match heads_up {
                true => offset == 0,
                false => offset == 1,
            };
            seat.is_big_blind = match heads_up {
                true => offset == 1,
                false => offset == 2,
            };
        }
        Ok(())
    }

    /// one card at a time around the ring, twice, starting left of the
    /// button
    fn deal_holes(&mut self) -> Result<(), GameError> {
        let ring = self.live_ring();
        let order = ring
            .iter()
            .cycle()
            .skip(1)
            .take(ring.len())
            .copied()
            .collect::<Vec<usize>>();
        let mut first = Vec::with_capacity(order.len());
        for _ in &order {
            first.push(self.draw()?);
        }
        let mut second = Vec::with_capacity(order.len());
        for _ in &order {
            second.push(self.draw()?);
        }
        for (offset, &index) in order.iter().enumerate() {
            self.seats[index].hole = Some([first[offset], second[offset]]);
        }
        Ok(())
    }

    fn draw(&mut self) -> Result<Card, GameError> {
        self.deck
            .deal()
            .ok_or_else(|| GameError::State("deck exhausted".to_string()))
    }

    /// Route the hand forward after an action (or the blinds): to the
    /// next decision, the next street, a runout, a showdown, or the next
    /// hand.
    fn resolve(&mut self, last: usize, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        if self.contesting().len() == 1 {
            return self.end_uncontested(events);
        }
        if !self.round_complete() {
            self.to_act = self.next_needing(last);
            return match self.to_act {
                Some(_) => Ok(()),
                None => Err(GameError::State(
                    "open betting round with nobody to act".to_string(),
                )),
            };
        }
        // street betting is settled
        let actionable = self
            .seats
            .iter()
            .filter(|s| s.is_actionable() && s.chips > 0)
            .count();
        if actionable <= 1 {
            // no more betting possible: run the board out and show down
            while self.betting.street != Street::River {
                self.open_street(events)?;
            }
            return self.end_showdown(events);
        }
        if self.betting.street == Street::River {
            return self.end_showdown(events);
        }
        self.open_street(events)?;
        self.to_act = self.next_needing(self.button);
        match self.to_act {
            Some(_) => Ok(()),
            None => Err(GameError::State(
                "fresh street with nobody to act".to_string(),
            )),
        }
    }

    /// burn one, deal the street, reset per-street betting
    fn open_street(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let street = self
            .betting
            .street
            .next()
            .ok_or_else(|| GameError::State("no street after the river".to_string()))?;
        let pot = self.pot_total();
        for seat in self.seats.iter_mut() {
            seat.bet = 0;
            if seat.is_actionable() {
                seat.has_acted = false;
                seat.status = SeatStatus::Waiting;
            }
        }
        self.deck
            .burn()
            .ok_or_else(|| GameError::State("deck exhausted at the burn".to_string()))?;
        let mut dealt = Vec::with_capacity(street.draws());
        for _ in 0..street.draws() {
            dealt.push(self.draw()?);
        }
        self.board.extend(&dealt);
        self.betting.advance(street, pot, self.config.big_blind);
        events.push(GameEvent::with(
            "STREET",
            json!({ "street": street, "cards": dealt, "board": self.board }),
        ));
        Ok(())
    }

    fn end_uncontested(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let winner = self
            .contesting()
            .first()
            .copied()
            .ok_or_else(|| GameError::State("hand ended with no contestant".to_string()))?;
        let pot = self.pot_total();
        self.seats[winner].chips += pot;
        for seat in self.seats.iter_mut() {
            seat.bet = 0;
            seat.total_invested = 0;
        }
        events.push(GameEvent::with(
            "UNCONTESTED",
            json!({ "seat": winner, "amount": pot }),
        ));
        self.end_hand(events)
    }

    fn end_showdown(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let settlement = showdown::settle(&self.seats, &self.board)?;
        for (index, &win) in settlement.payouts.iter().enumerate() {
            self.seats[index].chips += win;
        }
        for seat in self.seats.iter_mut() {
            seat.bet = 0;
            seat.total_invested = 0;
        }
        events.push(GameEvent::with(
            "SHOWDOWN",
            json!({
                "board": self.board,
                "pots": settlement
                    .awards
                    .iter()
                    .map(|award| json!({
                        "amount": award.pot.amount,
                        "isMain": award.pot.is_main,
                        "eligible": award.pot.eligible,
                        "winners": award.winners,
                        "share": award.share,
                    }))
                    .collect::<Vec<serde_json::Value>>(),
                "revealed": settlement
                    .strengths
                    .iter()
                    .map(|(seat, strength)| json!({
                        "seat": seat,
                        "cards": self.seats[*seat].hole,
                        "strength": strength,
                    }))
                    .collect::<Vec<serde_json::Value>>(),
            }),
        ));
        self.end_hand(events)
    }

    fn end_hand(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        debug_assert_eq!(
            self.seats.iter().map(|s| s.chips).sum::<Chips>(),
            self.config.starting_chips * self.seats.len() as Chips,
        );
        let stacks = self.seats.iter().map(|s| s.chips).collect::<Vec<Chips>>();
        events.push(GameEvent::with(
            "HAND_END",
            json!({ "handNumber": self.hand_number, "stacks": stacks }),
        ));
        for seat in &self.seats {
            if seat.chips == 0 && seat.status != SeatStatus::SittingOut {
                events.push(GameEvent::with("ELIMINATED", json!({ "seat": seat.index })));
            }
        }
        let funded = self.seats.iter().filter(|s| s.chips > 0).count();
        if funded <= 1 || self.hand_number >= self.config.max_hands {
            log::debug!(
                "hand {} ends the match, {} seats still funded",
                self.hand_number,
                funded
            );
            self.terminal = true;
            self.to_act = None;
            return Ok(());
        }
        self.start_hand(events)
    }
}

// seat scans
impl Table {
    /// funded seats in ring order starting at the button
    fn live_ring(&self) -> Vec<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|offset| (self.button + offset) % n)
            .filter(|&i| self.seats[i].status != SeatStatus::SittingOut)
            .collect()
    }

    fn contesting(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| s.is_contesting())
            .map(|s| s.index)
            .collect()
    }

    fn blind_seat(&self, which: impl Fn(&Seat) -> bool) -> Result<usize, GameError> {
        self.seats
            .iter()
            .find(|s| which(s))
            .map(|s| s.index)
            .ok_or_else(|| GameError::State("blind seat unassigned".to_string()))
    }

    /// a seat still owes a decision if it can act and either has not
    /// acted since the last full raise or has not matched the price
    fn needs_action(&self, seat: &Seat) -> bool {
        seat.is_actionable() && (!seat.has_acted || seat.bet < self.betting.current_bet)
    }

    fn next_needing(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&i| self.needs_action(&self.seats[i]))
    }

    fn next_funded(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|&i| self.seats[i].chips > 0)
    }

    fn round_complete(&self) -> bool {
        !self.seats.iter().any(|s| self.needs_action(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdem::position::Position;

    fn heads_up(seed: &str) -> Table {
        Table::new(seed, 2, HoldemConfig::single_hand()).unwrap()
    }

    fn three_handed(seed: &str) -> Table {
        Table::new(seed, 3, HoldemConfig::single_hand()).unwrap()
    }

    #[test]
    fn blinds_are_posted_at_hand_start() {
        let table = heads_up("blinds");
        assert_eq!(table.seats()[0].bet, 10);
        assert_eq!(table.seats()[1].bet, 20);
        assert_eq!(table.pot_total(), 30);
        assert_eq!(table.betting().current_bet, 20);
        assert_eq!(table.betting().min_raise, 20);
    }

    #[test]
    fn heads_up_button_posts_the_small_blind_and_acts_first() {
        let table = heads_up("hu-order");
        assert!(table.seats()[0].is_button);
        assert!(table.seats()[0].is_small_blind);
        assert!(table.seats()[1].is_big_blind);
        assert_eq!(table.to_act(), Some(0));
        assert_eq!(table.seats()[0].position, Some(Position::Button));
        assert_eq!(table.seats()[1].position, Some(Position::BigBlind));
    }

    #[test]
    fn three_handed_blinds_sit_left_of_the_button() {
        let table = three_handed("3h-order");
        assert!(table.seats()[0].is_button);
        assert!(table.seats()[1].is_small_blind);
        assert!(table.seats()[2].is_big_blind);
        // first voluntary action belongs to the seat after the big blind
        assert_eq!(table.to_act(), Some(0));
    }

    #[test]
    fn every_live_seat_is_dealt_two_cards() {
        let table = three_handed("deal");
        let holes = table
            .seats()
            .iter()
            .filter_map(|s| s.hole)
            .flatten()
            .collect::<Vec<Card>>();
        assert_eq!(holes.len(), 6);
        let distinct = holes
            .iter()
            .collect::<std::collections::HashSet<&Card>>();
        assert_eq!(distinct.len(), 6);
    }

    #[test]
    fn the_same_seed_deals_the_same_hand() {
        let a = three_handed("identical");
        let b = three_handed("identical");
        for (x, y) in a.seats().iter().zip(b.seats()) {
            assert_eq!(x.hole, y.hole);
        }
    }

    #[test]
    fn heads_up_fold_moves_the_blinds() {
        let mut table = heads_up("fold-test");
        assert_eq!(table.legal_actions(0)[0], HoldemAction::Fold);
        table.apply(0, &HoldemAction::Fold).unwrap();
        assert!(table.is_terminal());
        assert_eq!(table.seats()[0].chips, 990);
        assert_eq!(table.seats()[1].chips, 1010);
    }

    #[test]
    fn big_blind_gets_the_option() {
        let mut table = heads_up("option");
        table.apply(0, &HoldemAction::Call).unwrap();
        // blinds matched, but the big blind has not acted yet
        assert_eq!(table.to_act(), Some(1));
        let legal = table.legal_actions(1);
        assert_eq!(legal[0], HoldemAction::Check);
        assert!(legal.contains(&HoldemAction::Raise { amount: 40 }));
        table.apply(1, &HoldemAction::Check).unwrap();
        assert_eq!(table.betting().street, Street::Flop);
        assert_eq!(table.board().len(), 3);
    }

    #[test]
    fn checked_down_hand_reaches_showdown_and_conserves_chips() {
        let mut table = heads_up("check-down");
        table.apply(0, &HoldemAction::Call).unwrap();
        table.apply(1, &HoldemAction::Check).unwrap();
        for _ in 0..3 {
            // postflop the big blind acts first heads-up
            table.apply(1, &HoldemAction::Check).unwrap();
            table.apply(0, &HoldemAction::Check).unwrap();
        }
        assert!(table.is_terminal());
        assert_eq!(table.board().len(), 5);
        let total = table.seats().iter().map(|s| s.chips).sum::<Chips>();
        assert_eq!(total, 2000);
        // somebody won the 40-chip pot (or chopped it)
        let max = table.seats().iter().map(|s| s.chips).max().unwrap();
        assert!(max == 1020 || max == 1000);
    }

    #[test]
    fn a_raise_reopens_action_a_short_all_in_does_not() {
        let mut table = three_handed("reopen");
        // preflop: button calls, small blind folds, big blind checks
        table.apply(0, &HoldemAction::Call).unwrap();
        table.apply(1, &HoldemAction::Fold).unwrap();
        table.apply(2, &HoldemAction::Check).unwrap();
        assert_eq!(table.betting().street, Street::Flop);
        // flop: first live seat after the button is the big blind
        assert_eq!(table.to_act(), Some(2));
        table.apply(2, &HoldemAction::Bet { amount: 100 }).unwrap();
        assert!(table.seats()[2].has_acted);
        // a full raise reopens the bettor's action
        table.apply(0, &HoldemAction::Raise { amount: 900 }).unwrap();
        assert!(!table.seats()[2].has_acted);
        assert_eq!(table.min_raise_to(), 1700);
        // a short all-in (980 over 900, below the 800 minimum) raises the
        // price but does not reopen
        table.apply(2, &HoldemAction::AllIn).unwrap();
        assert_eq!(table.betting().current_bet, 980);
        assert!(table.seats()[0].has_acted);
        let legal = table.legal_actions(0);
        assert!(legal.contains(&HoldemAction::Fold));
        assert!(legal.contains(&HoldemAction::AllIn));
        assert!(!legal.iter().any(|a| matches!(a, HoldemAction::Raise { .. })));
    }

    #[test]
    fn all_in_runout_deals_the_full_board() {
        let mut table = heads_up("runout");
        table.apply(0, &HoldemAction::AllIn).unwrap();
        // calling all in ends the betting; board runs out to the river
        table.apply(1, &HoldemAction::AllIn).unwrap();
        assert!(table.is_terminal());
        assert_eq!(table.board().len(), 5);
        let total = table.seats().iter().map(|s| s.chips).sum::<Chips>();
        assert_eq!(total, 2000);
    }

    #[test]
    fn burns_precede_every_street() {
        let mut table = heads_up("burns");
        table.apply(0, &HoldemAction::AllIn).unwrap();
        table.apply(1, &HoldemAction::AllIn).unwrap();
        // one burn per street: flop, turn, river
        assert_eq!(table.deck.burned().len(), 3);
    }

    #[test]
    fn button_rotates_between_hands() {
        let mut table = Table::new("rotate", 3, HoldemConfig::default()).unwrap();
        assert_eq!(table.button(), 0);
        table.apply(0, &HoldemAction::Fold).unwrap();
        table.apply(1, &HoldemAction::Fold).unwrap();
        assert_eq!(table.hand_number(), 2);
        assert_eq!(table.button(), 1);
        assert!(table.seats()[1].is_button);
    }

    #[test]
    fn match_ends_when_one_seat_holds_every_chip() {
        let mut table = Table::new("bust", 2, HoldemConfig::default()).unwrap();
        let mut guard = 0;
        while !table.is_terminal() {
            let actor = table.to_act().unwrap();
            table.apply(actor, &HoldemAction::AllIn).unwrap();
            let actor = table.to_act();
            if let Some(actor) = actor {
                let legal = table.legal_actions(actor);
                let shove = legal
                    .iter()
                    .find(|a| matches!(a, HoldemAction::AllIn))
                    .copied()
                    .unwrap_or(legal[0]);
                table.apply(actor, &shove).unwrap();
            }
            guard += 1;
            assert!(guard < 200, "match never terminated");
        }
        let chips = table.seats().iter().map(|s| s.chips).collect::<Vec<Chips>>();
        assert!(chips.contains(&2000) || table.hand_number() >= table.config().max_hands);
    }

    #[test]
    fn out_of_turn_actions_are_rejected() {
        let mut table = three_handed("turn-order");
        let err = table.apply(1, &HoldemAction::Fold).unwrap_err();
        assert!(matches!(err, GameError::State(_)));
    }

    #[test]
    fn stacks_below_the_min_raise_cannot_raise_but_can_shove() {
        let mut table = heads_up("short-shove");
        // button makes it 990 total, leaving the big blind short
        table.apply(0, &HoldemAction::Raise { amount: 990 }).unwrap();
        let legal = table.legal_actions(1);
        // calling 970 of the 980 behind is possible, raising to 1960 is not
        assert!(legal.contains(&HoldemAction::Call));
        assert!(legal.contains(&HoldemAction::AllIn));
        assert!(!legal.iter().any(|a| matches!(a, HoldemAction::Raise { .. })));
    }
}
