//! What the table reports back to its host.

use serde::Serialize;

use crate::game::{
    Outcome, Street,
    entities::{Card, Usd},
};

/// Result of one `Table::advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepResult {
    /// The table did one unit of work and is now on this street
    Stepped(Street),

    /// Nothing happens until the human acts
    AwaitingHuman { to_call: Usd },

    /// The hand is over; waiting for `start_next_hand`
    WaitingNextHand,

    /// The session is over; every further call returns this again
    SessionOver(Outcome),
}

/// One seat as the human is allowed to see it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub name: String,
    pub chips: Usd,

    /// Chips put in on the current street
    pub street_bet: Usd,

    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub is_turn: bool,

    /// Computer cards are only shown once the table reveals them
    pub hole_cards: Option<Vec<Card>>,
}

/// Snapshot of the table for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub hand_no: u32,
    pub street: Street,
    pub seats: Vec<SeatView>,
    pub board: Vec<Card>,

    /// Everything wagered this hand, all layers together
    pub pot: Usd,

    /// Bet to match on the current street
    pub current_bet: Usd,

    pub small_blind: Usd,
    pub big_blind: Usd,

    /// Set while the table waits on the human
    pub to_call: Option<Usd>,
}
