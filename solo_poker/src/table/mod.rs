//! Table module: the session a host drives one step at a time.
//!
//! This module implements:
//! - Table: owns the hand state machine, the human's action slot and the bots
//! - GameSettings: seat count, difficulty, stacks and blinds
//! - StepResult/TableView: what the host gets back
//!
//! ## Example
//!
//! ```
//! use solo_poker::{GameSettings, StepResult, Table};
//!
//! let mut table = Table::with_seed(GameSettings::default(), 3);
//! loop {
//!     match table.advance() {
//!         StepResult::AwaitingHuman { .. } => {
//!             table.submit_command("fold").unwrap();
//!         }
//!         StepResult::WaitingNextHand => break,
//!         _ => {}
//!     }
//! }
//! for event in table.drain_events() {
//!     println!("{event}");
//! }
//! ```

pub mod config;
pub mod messages;
pub mod session;

pub use crate::game::Outcome;
pub use config::{ConfigError, Difficulty, GameSettings};
pub use messages::{SeatView, StepResult, TableView};
pub use session::Table;
