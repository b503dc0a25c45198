use super::card::Card;
use super::class::HandClass;
use super::rank::Rank;
use super::strength::Strength;

/// Classify one 5-card hand.
///
/// Works from rank counts plus a straight/flush scan; tiebreakers come out
/// ordered by (multiplicity, rank) descending, which is exactly the order
/// ties are broken in. The wheel A-2-3-4-5 ranks as a 5-high straight.
pub fn evaluate5(cards: &[Card; 5]) -> Strength {
    let mut counts = [0u8; 13];
    for card in cards {
        counts[card.rank() as usize] += 1;
    }
    let flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight = straight_high(&counts);

    // rank groups ordered by multiplicity, then rank, descending
    let mut groups = counts
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .map(|(i, &n)| (n, Rank::from(i as u8)))
        .collect::<Vec<(u8, Rank)>>();
    groups.sort_by(|a, b| b.cmp(a));
    let ranks = groups.iter().map(|&(_, r)| r).collect::<Vec<Rank>>();

    match (flush, straight, groups[0].0) {
        (true, Some(Rank::Ace), _) => Strength::new(HandClass::RoyalFlush, vec![]),
        (true, Some(high), _) => Strength::new(HandClass::StraightFlush, vec![high]),
        (_, _, 4) => Strength::new(HandClass::FourOfAKind, ranks),
        (_, _, 3) if groups[1].0 == 2 => Strength::new(HandClass::FullHouse, ranks),
        (true, _, _) => Strength::new(HandClass::Flush, ranks),
        (_, Some(high), _) => Strength::new(HandClass::Straight, vec![high]),
        (_, _, 3) => Strength::new(HandClass::ThreeOfAKind, ranks),
        (_, _, 2) if groups[1].0 == 2 => Strength::new(HandClass::TwoPair, ranks),
        (_, _, 2) => Strength::new(HandClass::OnePair, ranks),
        _ => Strength::new(HandClass::HighCard, ranks),
    }
}

/// Best 5-card hand out of 7: the lexicographic max over all C(7,5) = 21
/// subsets under `(class, tiebreakers)`.
pub fn evaluate7(cards: &[Card; 7]) -> Strength {
    let mut best: Option<Strength> = None;
    for skip_a in 0..7 {
        for skip_b in skip_a + 1..7 {
            let mut five = [cards[0]; 5];
            let mut k = 0;
            for (i, &card) in cards.iter().enumerate() {
                if i != skip_a && i != skip_b {
                    five[k] = card;
                    k += 1;
                }
            }
            let strength = evaluate5(&five);
            best = match best {
                Some(prior) if prior >= strength => Some(prior),
                _ => Some(strength),
            };
        }
    }
    best.expect("21 subsets evaluated")
}

fn straight_high(counts: &[u8; 13]) -> Option<Rank> {
    let mask = counts
        .iter()
        .enumerate()
        .filter(|(_, &n)| n > 0)
        .fold(0u16, |m, (i, _)| m | (1 << i));
    for high in (4..13).rev() {
        let run = 0b11111u16 << (high - 4);
        if mask & run == run {
            return Some(Rank::from(high as u8));
        }
    }
    const WHEEL: u16 = 0b1_0000_0000_1111;
    if mask & WHEEL == WHEEL {
        return Some(Rank::Five);
    }
    None
}
