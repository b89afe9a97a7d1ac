//! Poker hand engine - entities, evaluation, betting and the street FSM.
//!
//! This module provides the foundational hand-resolution implementation:
//! - Type-safe finite state machine with 12 streets
//! - Betting round bookkeeping and side-pot layering
//! - Seven-card hand evaluation
//! - Game events for whatever renders the table

pub mod betting;
pub mod constants;
pub mod entities;
pub mod functional;
pub mod state_machine;
pub mod states;
pub mod transitions;

pub use state_machine::{
    Game, GameData, GameEvent, HandState, HandStateManagement, Outcome, Street, UserError,
};
