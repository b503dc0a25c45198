use super::class::HandClass;
use super::rank::Rank;

/// A 5-card hand's strength: its class plus the ordered ranks that break
/// ties within the class (quads carry `[quad rank, kicker]`, two pair
/// `[high pair, low pair, kicker]`, and so on). The derived ordering --
/// class first, then tiebreakers lexicographically -- is a total order
/// over all 5-card hands.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    pub class: HandClass,
    pub tiebreaks: Vec<Rank>,
}

impl Strength {
    pub fn new(class: HandClass, tiebreaks: Vec<Rank>) -> Self {
        Self { class, tiebreaks }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<14}", self.class.to_string())?;
        for rank in &self.tiebreaks {
            write!(f, "{}", rank)?;
        }
        Ok(())
    }
}

impl serde::Serialize for Strength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut out = serializer.serialize_struct("Strength", 3)?;
        out.serialize_field("rank", &self.class)?;
        out.serialize_field("rankValue", &self.class.value())?;
        out.serialize_field("tiebreakers", &self.tiebreaks)?;
        out.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_dominates_tiebreaks() {
        let pair_of_aces = Strength::new(HandClass::OnePair, vec![Rank::Ace, Rank::King]);
        let two_low_pair = Strength::new(HandClass::TwoPair, vec![Rank::Three, Rank::Two]);
        assert!(two_low_pair > pair_of_aces);
    }

    #[test]
    fn tiebreaks_compare_lexicographically() {
        let kq = Strength::new(HandClass::HighCard, vec![Rank::King, Rank::Queen]);
        let kj = Strength::new(HandClass::HighCard, vec![Rank::King, Rank::Jack]);
        assert!(kq > kj);
    }

    #[test]
    fn serializes_the_wire_shape() {
        let strength = Strength::new(HandClass::FourOfAKind, vec![Rank::Nine, Rank::Ace]);
        let json = serde_json::to_value(&strength).unwrap();
        assert_eq!(json["rank"], "four_of_a_kind");
        assert_eq!(json["rankValue"], 8);
        assert_eq!(json["tiebreakers"], serde_json::json!(["9", "A"]));
    }
}
