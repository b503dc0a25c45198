use super::card::Card;
use crate::rng::Rng;

/// The 52-card deck in a caller-determined shuffle order, dealt
/// sequentially. Burn cards are tracked on the side so the full deal
/// order stays indexable for deterministic replay.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
    burns: Vec<Card>,
}

impl Deck {
    pub fn shuffled(rng: &mut Rng) -> Self {
        let cards = (0..52).map(Card::from).collect::<Vec<Card>>();
        Self {
            cards: rng.shuffle(&cards),
            next: 0,
            burns: Vec::new(),
        }
    }

    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    pub fn burn(&mut self) -> Option<Card> {
        let card = self.deal()?;
        self.burns.push(card);
        Some(card)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    pub fn burned(&self) -> &[Card] {
        &self.burns
    }
}
