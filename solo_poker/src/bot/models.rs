//! Bot difficulty parameters.

use crate::{game::entities::Usd, table::config::Difficulty};

/// Tunables for one difficulty preset. Sizes are in big blinds.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyParams {
    /// Chance of raising with nothing when checking is free.
    pub bluff_frequency: f64,

    /// Raise size for bluffs and for value raises when checking is free.
    pub open_raise_bb: Usd,

    /// Raise size for premium hands when checking is free (Hard only).
    pub premium_raise_bb: Usd,

    /// Chance of raising a medium hand instead of checking (Hard only).
    pub medium_raise_frequency: f64,

    /// Weak hands fold to bets larger than this (Hard only).
    pub max_call_bb: Usd,
}

impl DifficultyParams {
    /// Easy: passive, never raises
    pub fn easy() -> Self {
        Self {
            bluff_frequency: 0.0,
            open_raise_bb: 0,
            premium_raise_bb: 0,
            medium_raise_frequency: 0.0,
            max_call_bb: 1,
        }
    }

    /// Normal: raises good starting hands, bluffs 10% of free turns
    pub fn normal() -> Self {
        Self {
            bluff_frequency: 0.10,
            open_raise_bb: 2,
            premium_raise_bb: 2,
            medium_raise_frequency: 0.0,
            max_call_bb: 1,
        }
    }

    /// Hard: scores suitedness and connectors, raises premiums hard
    pub fn hard() -> Self {
        Self {
            bluff_frequency: 0.15,
            open_raise_bb: 2,
            premium_raise_bb: 3,
            medium_raise_frequency: 0.35,
            max_call_bb: 4,
        }
    }

    /// Get parameters for a given difficulty
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(),
            Difficulty::Normal => Self::normal(),
            Difficulty::Hard => Self::hard(),
        }
    }
}
