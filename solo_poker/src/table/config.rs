//! Table configuration models.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::game::{
    constants::{DEFAULT_BIG_BLIND, DEFAULT_STARTING_CHIPS, MAX_BOTS, MAX_STARTING_CHIPS, MIN_BOTS},
    entities::Usd,
};

/// Bot difficulty presets
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy, // Checks and calls small bets, never raises
    #[default]
    Normal, // Raises good starting hands, bluffs a little
    Hard, // Weighs suitedness and connectors, bluffs more, folds to big bets
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Normal => write!(f, "normal"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Errors in user supplied table settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("need 1 to 4 computer players, got {0}")]
    InvalidSeatCount(usize),
    #[error("starting chips must be positive")]
    InvalidStack,
    #[error("starting chips can't exceed {MAX_STARTING_CHIPS}, got {0}")]
    StackTooLarge(Usd),
    #[error("big blind must be at least 2, got {0}")]
    InvalidBlind(Usd),
    #[error("big blind {big_blind} is larger than the starting stack {starting_chips}")]
    BlindAboveStack { big_blind: Usd, starting_chips: Usd },
    #[error("unknown difficulty `{0}` (easy, normal, hard)")]
    UnknownDifficulty(String),
    #[error("can't read settings: {0}")]
    Parse(String),
}

/// Session settings, chosen once before the first hand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of computer seats (1-4)
    pub num_bots: usize,

    /// Difficulty shared by every computer seat
    pub difficulty: Difficulty,

    /// Stack every seat starts the session with
    pub starting_chips: Usd,

    /// Big blind; the small blind is always half of it
    pub big_blind: Usd,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            num_bots: MIN_BOTS,
            difficulty: Difficulty::Normal,
            starting_chips: DEFAULT_STARTING_CHIPS,
            big_blind: DEFAULT_BIG_BLIND,
        }
    }
}

impl GameSettings {
    /// Read settings from a JSON document. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    #[must_use]
    pub fn small_blind(&self) -> Usd {
        self.big_blind / 2
    }

    /// Check settings as given, without fixing anything up
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOTS..=MAX_BOTS).contains(&self.num_bots) {
            return Err(ConfigError::InvalidSeatCount(self.num_bots));
        }
        if self.starting_chips == 0 {
            return Err(ConfigError::InvalidStack);
        }
        if self.starting_chips > MAX_STARTING_CHIPS {
            return Err(ConfigError::StackTooLarge(self.starting_chips));
        }
        if self.big_blind < 2 {
            return Err(ConfigError::InvalidBlind(self.big_blind));
        }
        if self.big_blind > self.starting_chips {
            return Err(ConfigError::BlindAboveStack {
                big_blind: self.big_blind,
                starting_chips: self.starting_chips,
            });
        }
        Ok(())
    }

    /// Clamp every field into range: 1-4 bots, a stack of 2 up to
    /// `MAX_STARTING_CHIPS`, and an even big blind of at least 2 (so the
    /// small blind is exactly half) that fits in the stack.
    #[must_use]
    pub fn normalized(self) -> Self {
        let starting_chips = self.starting_chips.clamp(2, MAX_STARTING_CHIPS);
        let big_blind = self.big_blind.max(2);
        let big_blind = big_blind
            .saturating_add(big_blind % 2)
            .min(starting_chips - starting_chips % 2);
        Self {
            num_bots: self.num_bots.clamp(MIN_BOTS, MAX_BOTS),
            difficulty: self.difficulty,
            starting_chips,
            big_blind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::constants::MAX_SEATS;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.small_blind(), 10);
        assert_eq!(settings.difficulty, Difficulty::Normal);
    }

    #[test]
    fn test_validate_reports_each_problem() {
        let settings = GameSettings {
            num_bots: 5,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidSeatCount(5)));

        let settings = GameSettings {
            starting_chips: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidStack));

        let settings = GameSettings {
            big_blind: 1,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidBlind(1)));
    }

    #[test]
    fn test_validate_bounds_chip_totals() {
        let largest = GameSettings {
            num_bots: MAX_BOTS,
            starting_chips: MAX_STARTING_CHIPS,
            big_blind: MAX_STARTING_CHIPS,
            ..Default::default()
        };
        assert_eq!(largest.validate(), Ok(()));
        assert!(MAX_STARTING_CHIPS.checked_mul(MAX_SEATS as Usd).is_some());

        let settings = GameSettings {
            starting_chips: 1_000_000_000,
            ..largest.clone()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::StackTooLarge(1_000_000_000))
        );

        let settings = GameSettings {
            starting_chips: 100,
            big_blind: 200,
            ..Default::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::BlindAboveStack {
                big_blind: 200,
                starting_chips: 100
            })
        );
    }

    #[test]
    fn test_normalized_clamps_and_evens_the_blind() {
        let settings = GameSettings {
            num_bots: 9,
            difficulty: Difficulty::Hard,
            starting_chips: 1000,
            big_blind: 25,
        }
        .normalized();
        assert_eq!(settings.num_bots, MAX_BOTS);
        assert_eq!(settings.big_blind, 26);
        assert_eq!(settings.small_blind(), 13);
        assert_eq!(settings.validate(), Ok(()));

        let settings = GameSettings {
            num_bots: 0,
            starting_chips: 0,
            big_blind: 0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(settings.num_bots, MIN_BOTS);
        assert_eq!(settings.starting_chips, 2);
        assert_eq!(settings.big_blind, 2);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_normalized_fits_huge_settings() {
        let settings = GameSettings {
            num_bots: MAX_BOTS,
            difficulty: Difficulty::Hard,
            starting_chips: Usd::MAX,
            big_blind: Usd::MAX,
        }
        .normalized();
        assert_eq!(settings.starting_chips, MAX_STARTING_CHIPS);
        assert!(settings.big_blind <= settings.starting_chips);
        assert_eq!(settings.big_blind % 2, 0);
        assert_eq!(settings.validate(), Ok(()));

        let settings = GameSettings {
            starting_chips: 25,
            big_blind: 25,
            ..Default::default()
        }
        .normalized();
        assert_eq!(settings.big_blind, 24);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(ConfigError::UnknownDifficulty("brutal".to_string()))
        );
    }

    #[test]
    fn test_settings_from_json() {
        let settings = GameSettings::from_json(r#"{"num_bots": 3, "difficulty": "hard"}"#);
        assert_eq!(
            settings,
            Ok(GameSettings {
                num_bots: 3,
                difficulty: Difficulty::Hard,
                ..Default::default()
            })
        );
        assert!(matches!(
            GameSettings::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
