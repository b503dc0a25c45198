use crate::Chips;
use colored::Colorize;
use serde::Deserialize;
use serde::Serialize;

/// A betting decision.
///
/// Bet and raise amounts are the **total** chips the player wants in for
/// the current street, not the increment on top of their standing bet.
/// A raise to 60 over a bet of 20 is `Raise { amount: 60 }`. All-ins are
/// their own variant so a shove below the minimum raise stays expressible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HoldemAction {
    Fold,
    Check,
    Call,
    Bet { amount: Chips },
    Raise { amount: Chips },
    AllIn,
}

impl HoldemAction {
    pub fn is_aggressive(&self) -> bool {
        matches!(
            self,
            HoldemAction::Bet { .. } | HoldemAction::Raise { .. } | HoldemAction::AllIn
        )
    }
}

impl std::fmt::Display for HoldemAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            HoldemAction::Fold => write!(f, "{}", "FOLD".red()),
            HoldemAction::Check => write!(f, "{}", "CHECK".cyan()),
            HoldemAction::Call => write!(f, "{}", "CALL".yellow()),
            HoldemAction::Bet { amount } => write!(f, "{}", format!("BET   {}", amount).green()),
            HoldemAction::Raise { amount } => write!(f, "{}", format!("RAISE {}", amount).green()),
            HoldemAction::AllIn => write!(f, "{}", "ALL IN".magenta()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged_snake_case() {
        assert_eq!(
            serde_json::to_string(&HoldemAction::Fold).unwrap(),
            r#"{"type":"fold"}"#
        );
        assert_eq!(
            serde_json::to_string(&HoldemAction::AllIn).unwrap(),
            r#"{"type":"all_in"}"#
        );
        assert_eq!(
            serde_json::to_string(&HoldemAction::Raise { amount: 60 }).unwrap(),
            r#"{"type":"raise","amount":60}"#
        );
    }

    #[test]
    fn round_trips_through_json() {
        for action in [
            HoldemAction::Fold,
            HoldemAction::Check,
            HoldemAction::Call,
            HoldemAction::Bet { amount: 40 },
            HoldemAction::Raise { amount: 120 },
            HoldemAction::AllIn,
        ] {
            let line = serde_json::to_string(&action).unwrap();
            assert_eq!(action, serde_json::from_str(&line).unwrap());
        }
    }
}
