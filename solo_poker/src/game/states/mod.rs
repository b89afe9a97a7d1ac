//! Street state types for the hand FSM.
//!
//! Each type is one phase of a hand. Only the betting streets carry data
//! of their own: the round being played on that street.

use super::{betting::BettingRound, state_machine::Street};

/// Ties a state type to the street it represents.
pub trait Phase {
    const STREET: Street;
}

/// Resetting seats, the deck and the ledger for the next hand
#[derive(Debug, Default)]
pub struct NewHand {}

/// Collecting small and big blinds
#[derive(Debug, Default)]
pub struct PostBlinds {}

/// Dealing hole cards. Carries the preflop round seeded by the blinds.
#[derive(Debug)]
pub struct DealHole {
    pub(crate) round: BettingRound,
}

#[derive(Debug)]
pub struct BettingPreflop {
    pub(crate) round: BettingRound,
}

/// Burning and dealing three community cards
#[derive(Debug, Default)]
pub struct DealFlop {}

#[derive(Debug)]
pub struct BettingFlop {
    pub(crate) round: BettingRound,
}

#[derive(Debug, Default)]
pub struct DealTurn {}

#[derive(Debug)]
pub struct BettingTurn {
    pub(crate) round: BettingRound,
}

#[derive(Debug, Default)]
pub struct DealRiver {}

#[derive(Debug)]
pub struct BettingRiver {
    pub(crate) round: BettingRound,
}

/// Evaluating hands and splitting the pot layers
#[derive(Debug, Default)]
pub struct Showdown {}

/// Hand is settled; busted seats are gone and the button has moved
#[derive(Debug, Default)]
pub struct EndHand {}

impl Phase for NewHand {
    const STREET: Street = Street::NewHand;
}

impl Phase for PostBlinds {
    const STREET: Street = Street::PostBlinds;
}

impl Phase for DealHole {
    const STREET: Street = Street::DealHole;
}

impl Phase for BettingPreflop {
    const STREET: Street = Street::BettingPreflop;
}

impl Phase for DealFlop {
    const STREET: Street = Street::DealFlop;
}

impl Phase for BettingFlop {
    const STREET: Street = Street::BettingFlop;
}

impl Phase for DealTurn {
    const STREET: Street = Street::DealTurn;
}

impl Phase for BettingTurn {
    const STREET: Street = Street::BettingTurn;
}

impl Phase for DealRiver {
    const STREET: Street = Street::DealRiver;
}

impl Phase for BettingRiver {
    const STREET: Street = Street::BettingRiver;
}

impl Phase for Showdown {
    const STREET: Street = Street::Showdown;
}

impl Phase for EndHand {
    const STREET: Street = Street::EndHand;
}
