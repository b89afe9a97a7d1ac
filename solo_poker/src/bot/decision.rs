//! Bot decision-making logic with difficulty-based behavior.

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::fmt;

use super::models::DifficultyParams;
use crate::{
    game::entities::{Action, Card, Player, Usd},
    table::config::Difficulty,
};

/// Anything that can play a computer seat.
///
/// `Raise(n)` carries the chips put in with the action, call portion
/// included. The table normalizes whatever comes back: a raise that doesn't
/// beat the call becomes a call, a short raise is lifted to the minimum and
/// a check facing a bet becomes a call.
pub trait Decide: fmt::Debug {
    fn decide(&mut self, player: &Player, to_call: Usd, big_blind: Usd) -> Action;
}

// === Hole card scoring ===

/// Normal preflop strength: 3 for a pair, 2 for two broadway cards with a
/// king or better, 1 for a jack or better, 0 otherwise.
#[must_use]
pub fn normal_strength(first: Card, second: Card) -> u8 {
    let (high, low) = (first.0.max(second.0), first.0.min(second.0));
    if first.0 == second.0 {
        3
    } else if high >= 13 && low >= 10 {
        2
    } else if high >= 11 {
        1
    } else {
        0
    }
}

/// Hard preflop strength, additive:
/// pair +4 (jacks or better +2 more), king or better +2,
/// jack-ten or better +1, suited +1, connected +1.
#[must_use]
pub fn hard_strength(first: Card, second: Card) -> u8 {
    let (high, low) = (first.0.max(second.0), first.0.min(second.0));
    let mut strength = 0;
    if first.0 == second.0 {
        strength += 4;
        if high >= 11 {
            strength += 2;
        }
    }
    if high >= 13 {
        strength += 2;
    }
    if high >= 11 && low >= 10 {
        strength += 1;
    }
    if first.1 == second.1 {
        strength += 1;
    }
    if high - low == 1 {
        strength += 1;
    }
    strength
}

/// `count` big blinds, capped at the largest representable bet.
fn in_blinds(big_blind: Usd, count: Usd) -> Usd {
    big_blind.saturating_mul(count)
}

fn check_or_call(to_call: Usd) -> Action {
    if to_call == 0 { Action::Check } else { Action::Call }
}

/// A computer player using one of the difficulty presets.
#[derive(Debug)]
pub struct Bot {
    difficulty: Difficulty,
    params: DifficultyParams,
    rng: StdRng,
}

impl Bot {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, StdRng::from_os_rng())
    }

    /// A bot whose bluffs are reproducible.
    #[must_use]
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_rng(difficulty, StdRng::seed_from_u64(seed))
    }

    fn with_rng(difficulty: Difficulty, rng: StdRng) -> Self {
        Self {
            difficulty,
            params: DifficultyParams::from_difficulty(difficulty),
            rng,
        }
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn roll(&mut self, probability: f64) -> bool {
        probability > 0.0 && self.rng.random_bool(probability.min(1.0))
    }

    fn decide_easy(to_call: Usd, big_blind: Usd) -> Action {
        if to_call == 0 {
            Action::Check
        } else if to_call <= big_blind {
            Action::Call
        } else {
            Action::Fold
        }
    }

    fn decide_normal(&mut self, first: Card, second: Card, to_call: Usd, big_blind: Usd) -> Action {
        let strength = normal_strength(first, second);
        let open_raise = in_blinds(big_blind, self.params.open_raise_bb);

        if to_call == 0 && self.roll(self.params.bluff_frequency) {
            return Action::Raise(open_raise);
        }
        match strength {
            2.. if to_call == 0 => Action::Raise(open_raise),
            2.. => Action::Call,
            1 if to_call <= in_blinds(big_blind, self.params.max_call_bb) => Action::Call,
            1 => Action::Fold,
            _ if to_call == 0 => Action::Check,
            _ => Action::Fold,
        }
    }

    fn decide_hard(&mut self, first: Card, second: Card, to_call: Usd, big_blind: Usd) -> Action {
        let strength = hard_strength(first, second);

        if to_call == 0 && self.roll(self.params.bluff_frequency) {
            return Action::Raise(in_blinds(big_blind, self.params.open_raise_bb));
        }
        if to_call > in_blinds(big_blind, self.params.max_call_bb) && strength < 4 {
            return Action::Fold;
        }
        if strength >= 6 {
            return if to_call == 0 {
                Action::Raise(in_blinds(big_blind, self.params.premium_raise_bb))
            } else {
                let reraise = in_blinds(big_blind, self.params.open_raise_bb);
                Action::Raise(to_call.saturating_add(reraise))
            };
        }
        if strength >= 4 {
            if to_call > 0 {
                return Action::Call;
            }
            return if self.roll(self.params.medium_raise_frequency) {
                Action::Raise(in_blinds(big_blind, self.params.open_raise_bb))
            } else {
                Action::Check
            };
        }
        Self::decide_easy(to_call, big_blind)
    }
}

impl Decide for Bot {
    fn decide(&mut self, player: &Player, to_call: Usd, big_blind: Usd) -> Action {
        let action = match *player.hole_cards.as_slice() {
            [first, second] => match self.difficulty {
                Difficulty::Easy => Self::decide_easy(to_call, big_blind),
                Difficulty::Normal => self.decide_normal(first, second, to_call, big_blind),
                Difficulty::Hard => self.decide_hard(first, second, to_call, big_blind),
            },
            _ => check_or_call(to_call),
        };
        debug!(
            "{} ({}) facing ${to_call}: {action}",
            player.name,
            self.difficulty()
        );
        action
    }
}
