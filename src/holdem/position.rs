use serde::Deserialize;
use serde::Serialize;

/// Table position by offset from the button. Heads-up collapses to
/// button (posting the small blind) and big blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "BTN")]
    Button,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "MP")]
    Middle,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "CO")]
    Cutoff,
}

/// Position labels for `n` live seats, indexed by offset from the button.
pub fn positions(n: usize) -> Vec<Position> {
    match n {
        2 => vec![Position::Button, Position::BigBlind],
        3 => vec![Position::Button, Position::SmallBlind, Position::BigBlind],
        4 => vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
        ],
        5 => vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
            Position::Cutoff,
        ],
        6 => vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
            Position::Hijack,
            Position::Cutoff,
        ],
        7 => vec![
            Position::Button,
            Position::SmallBlind,
            Position::BigBlind,
            Position::UnderTheGun,
            Position::Middle,
            Position::Hijack,
            Position::Cutoff,
        ],
        _ => vec![],
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Position::Button => write!(f, "BTN"),
            Position::SmallBlind => write!(f, "SB"),
            Position::BigBlind => write!(f, "BB"),
            Position::UnderTheGun => write!(f, "UTG"),
            Position::Middle => write!(f, "MP"),
            Position::Hijack => write!(f, "HJ"),
            Position::Cutoff => write!(f, "CO"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_has_button_and_big_blind() {
        assert_eq!(positions(2), vec![Position::Button, Position::BigBlind]);
    }

    #[test]
    fn six_handed_labels() {
        assert_eq!(
            positions(6),
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::Hijack,
                Position::Cutoff,
            ]
        );
    }

    #[test]
    fn serializes_short_labels() {
        assert_eq!(
            serde_json::to_string(&Position::UnderTheGun).unwrap(),
            r#""UTG""#
        );
    }
}
