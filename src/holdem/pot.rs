use super::seat::Seat;
use crate::Chips;
use serde::Serialize;

/// One pot: chips and the seats allowed to win them. The first pot is the
/// main pot; each later pot restricts eligibility further, so the eligible
/// sets form a downward chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<usize>,
    pub is_main: bool,
}

/// Build main and side pots from invested totals.
///
/// Levels are the distinct invested totals among contesting seats,
/// ascending. Each level's pot collects every seat's contribution between
/// the previous level and this one (folded money included -- it is won,
/// never returned), and is winnable by the contesting seats invested at or
/// above the level. An uncalled excess naturally forms a final pot whose
/// only eligible seat is the bettor, which returns it.
pub fn build_pots(seats: &[Seat]) -> Vec<Pot> {
    let mut levels = seats
        .iter()
        .filter(|s| s.is_contesting() && s.total_invested > 0)
        .map(|s| s.total_invested)
        .collect::<Vec<Chips>>();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::new();
    let mut prev = 0;
    for &level in &levels {
        let amount = seats
            .iter()
            .map(|s| std::cmp::min(s.total_invested, level).saturating_sub(prev))
            .sum::<Chips>();
        let eligible = seats
            .iter()
            .filter(|s| s.is_contesting() && s.total_invested >= level)
            .map(|s| s.index)
            .collect::<Vec<usize>>();
        pots.push(Pot {
            amount,
            eligible,
            is_main: prev == 0,
        });
        prev = level;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdem::seat::SeatStatus;

    fn seat(index: usize, invested: Chips, status: SeatStatus) -> Seat {
        let mut seat = Seat::buy_in(index, 10000);
        seat.put(invested);
        seat.status = status;
        seat
    }

    #[test]
    fn single_level_makes_one_main_pot() {
        let seats = vec![
            seat(0, 100, SeatStatus::Acted),
            seat(1, 100, SeatStatus::Acted),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 200);
        assert_eq!(pots[0].eligible, vec![0, 1]);
        assert!(pots[0].is_main);
    }

    #[test]
    fn short_all_in_splits_off_a_side_pot() {
        let seats = vec![
            seat(0, 100, SeatStatus::AllIn),
            seat(1, 300, SeatStatus::Acted),
            seat(2, 300, SeatStatus::Acted),
            seat(3, 50, SeatStatus::Folded),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 350);
        assert_eq!(pots[0].eligible, vec![0, 1, 2]);
        assert!(pots[0].is_main);
        assert_eq!(pots[1].amount, 400);
        assert_eq!(pots[1].eligible, vec![1, 2]);
        assert!(!pots[1].is_main);
    }

    #[test]
    fn pots_conserve_every_invested_chip() {
        let seats = vec![
            seat(0, 75, SeatStatus::AllIn),
            seat(1, 220, SeatStatus::AllIn),
            seat(2, 500, SeatStatus::Acted),
            seat(3, 130, SeatStatus::Folded),
            seat(4, 0, SeatStatus::SittingOut),
        ];
        let pots = build_pots(&seats);
        let invested = seats.iter().map(|s| s.total_invested).sum::<Chips>();
        let potted = pots.iter().map(|p| p.amount).sum::<Chips>();
        assert_eq!(invested, potted);
    }

    #[test]
    fn eligible_sets_form_a_downward_chain() {
        let seats = vec![
            seat(0, 75, SeatStatus::AllIn),
            seat(1, 220, SeatStatus::AllIn),
            seat(2, 500, SeatStatus::Acted),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 3);
        for pair in pots.windows(2) {
            assert!(pair[1].eligible.iter().all(|p| pair[0].eligible.contains(p)));
            assert!(pair[1].eligible.len() < pair[0].eligible.len());
        }
    }

    #[test]
    fn uncalled_excess_returns_through_a_solo_pot() {
        let seats = vec![
            seat(0, 300, SeatStatus::Acted),
            seat(1, 100, SeatStatus::AllIn),
            seat(2, 20, SeatStatus::Folded),
        ];
        let pots = build_pots(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[1].eligible, vec![0]);
        assert_eq!(pots[1].amount, 200);
    }
}
