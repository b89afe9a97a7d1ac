//! # Solo Poker
//!
//! A No-Limit Texas Hold'em hand engine for one human seat against one to four
//! computer seats, implemented as a type-safe finite state machine (FSM).
//!
//! The engine never blocks and never owns a clock. A host calls
//! [`Table::advance`] at whatever cadence it likes; each call performs one
//! unit of work (post blinds, deal a street, resolve one seat's turn, ...)
//! and reports what the table is waiting for.
//!
//! ## Architecture
//!
//! A hand moves through 12 phases (streets), each one a distinct state type:
//!
//! - **NewHand**: Shuffling, resetting players and the pot ledger
//! - **PostBlinds**: Collecting small and big blinds
//! - **DealHole**: Dealing two hole cards per seat
//! - **BettingPreflop/Flop/Turn/River**: Betting rounds
//! - **DealFlop/DealTurn/DealRiver**: Dealing community cards
//! - **Showdown**: Evaluating hands and splitting side pots
//! - **EndHand**: Eliminating busted seats and moving the button
//!
//! ## Core Modules
//!
//! - [`game`]: Entities, hand evaluation, betting rounds and the street FSM
//! - [`bot`]: Computer players behind the [`bot::Decide`] trait
//! - [`table`]: Session driver, settings, and step results
//!
//! ## Example
//!
//! ```
//! use solo_poker::{GameSettings, StepResult, Table};
//!
//! let mut table = Table::with_seed(GameSettings::default(), 7);
//! // Posting blinds and dealing never needs the human.
//! assert!(matches!(table.advance(), StepResult::Stepped(_)));
//! ```

/// Computer players and their decision heuristics.
pub mod bot;

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    GameEvent, HandState, Street, UserError,
    constants::{self, MAX_BOTS, MAX_SEATS},
    entities::{self, Action, Card, Player, PotLedger, SidePot, Suit, Usd},
    functional,
};

/// Session driver wrapping the hand FSM.
pub mod table;
pub use table::{
    ConfigError, Difficulty, GameSettings, Outcome, StepResult, Table, TableView,
};
