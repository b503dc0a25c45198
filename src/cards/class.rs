use serde::Deserialize;
use serde::Serialize;

/// The ten hand classes, ordered weakest to strongest. Kicker cards break
/// ties within a class; see `Strength`.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandClass {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandClass {
    /// 1-based strength value, 1 = high card .. 10 = royal flush
    pub fn value(self) -> u8 {
        self as u8 + 1
    }
}

impl std::fmt::Display for HandClass {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HandClass::HighCard => write!(f, "HighCard"),
            HandClass::OnePair => write!(f, "OnePair"),
            HandClass::TwoPair => write!(f, "TwoPair"),
            HandClass::ThreeOfAKind => write!(f, "ThreeOfAKind"),
            HandClass::Straight => write!(f, "Straight"),
            HandClass::Flush => write!(f, "Flush"),
            HandClass::FullHouse => write!(f, "FullHouse"),
            HandClass::FourOfAKind => write!(f, "FourOfAKind"),
            HandClass::StraightFlush => write!(f, "StraightFlush"),
            HandClass::RoyalFlush => write!(f, "RoyalFlush"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_cover_one_through_ten() {
        assert_eq!(HandClass::HighCard.value(), 1);
        assert_eq!(HandClass::RoyalFlush.value(), 10);
    }

    #[test]
    fn classes_are_totally_ordered() {
        assert!(HandClass::FullHouse > HandClass::Flush);
        assert!(HandClass::Straight > HandClass::ThreeOfAKind);
        assert!(HandClass::RoyalFlush > HandClass::StraightFlush);
    }
}
