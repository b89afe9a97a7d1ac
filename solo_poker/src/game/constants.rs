use std::time::Duration;

use super::entities::{SeatIndex, Usd};

/// The human always sits in the first seat of the seat table.
pub const HUMAN_SEAT: SeatIndex = 0;

pub const MIN_BOTS: usize = 1;
pub const MAX_BOTS: usize = 4;
pub const MAX_SEATS: usize = MAX_BOTS + 1;

pub const DEFAULT_STARTING_CHIPS: Usd = 1000;

/// Largest stack a full table can start with without the chip total
/// overflowing `Usd`.
pub const MAX_STARTING_CHIPS: Usd = Usd::MAX / MAX_SEATS as Usd;
pub const DEFAULT_BIG_BLIND: Usd = 20;

/// Community cards dealt per street, after one burn each.
pub const FLOP_CARDS: usize = 3;
pub const TURN_CARDS: usize = 1;
pub const RIVER_CARDS: usize = 1;

/// How long the results of a finished hand stay on screen before the
/// next hand is dealt.
pub const NEXT_HAND_DELAY: Duration = Duration::from_secs(3);

/// Default cadence for hosts that poll the table on a timer.
pub const DEFAULT_TICK: Duration = Duration::from_millis(250);

pub const HUMAN_NAME: &str = "Human";
