use crate::game::GameError;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HoldemConfig {
    pub starting_chips: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// hands played before the match ends regardless of stacks
    pub max_hands: usize,
}

impl Default for HoldemConfig {
    fn default() -> Self {
        Self {
            starting_chips: 1000,
            small_blind: 10,
            big_blind: 20,
            max_hands: 100,
        }
    }
}

impl HoldemConfig {
    /// deep-stack preset
    pub fn deep() -> Self {
        Self {
            starting_chips: 10000,
            small_blind: 50,
            big_blind: 100,
            max_hands: 100,
        }
    }

    pub fn single_hand() -> Self {
        Self {
            max_hands: 1,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.small_blind == 0 {
            return Err(GameError::InvalidConfig(
                "small blind must be positive".to_string(),
            ));
        }
        if self.big_blind < self.small_blind {
            return Err(GameError::InvalidConfig(
                "big blind below small blind".to_string(),
            ));
        }
        if self.starting_chips < self.big_blind {
            return Err(GameError::InvalidConfig(
                "starting stack below the big blind".to_string(),
            ));
        }
        if self.max_hands == 0 {
            return Err(GameError::InvalidConfig(
                "max hands must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(HoldemConfig::default().validate().is_ok());
        assert!(HoldemConfig::deep().validate().is_ok());
        assert!(HoldemConfig::single_hand().validate().is_ok());
    }

    #[test]
    fn inverted_blinds_are_rejected() {
        let config = HoldemConfig {
            small_blind: 50,
            big_blind: 20,
            ..HoldemConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_camel_case() {
        let config = HoldemConfig::deep();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["startingChips"], 10000);
        assert_eq!(json["smallBlind"], 50);
        let back: HoldemConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config, back);
    }
}
