use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use super::state_machine::UserError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    Club,
    Spade,
    Diamond,
    Heart,
}

impl Suit {
    pub const ALL: [Self; 4] = [Self::Club, Self::Spade, Self::Diamond, Self::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

/// Placeholder for card values.
pub type Value = u8;

pub const ACE: Value = 14;

/// A card is a tuple of a uInt8 value (deuce=2u8 ... ace=14u8) and a suit.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card(pub Value, pub Suit);

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match self.0 {
            14 => "A",
            11 => "J",
            12 => "Q",
            13 => "K",
            v => &v.to_string(),
        };
        let repr = format!("{value}{}", self.1);
        write!(f, "{repr:>3}")
    }
}

/// Poker hand categories, weakest first.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HighCard => "high card",
            Self::OnePair => "one pair",
            Self::TwoPair => "two pair",
            Self::ThreeOfAKind => "three of a kind",
            Self::Straight => "straight",
            Self::Flush => "flush",
            Self::FullHouse => "full house",
            Self::FourOfAKind => "four of a kind",
            Self::StraightFlush => "straight flush",
        };
        write!(f, "{repr}")
    }
}

/// Score of a best five-card hand. Field order matters: the derived
/// ordering compares the category first and then the tiebreak values
/// lexicographically.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct HandScore {
    pub category: HandCategory,
    /// Category-defining values followed by kickers, highest first.
    pub values: Vec<Value>,
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

#[derive(Debug)]
pub struct Deck {
    cards: [Card; 52],
    pub deck_idx: usize,
}

impl Deck {
    /// Next card off the top. A hand uses at most 10 hole cards, 3 burns
    /// and 5 board cards, so a shuffled deck is never exhausted.
    pub fn draw(&mut self) -> Card {
        let card = self.cards[self.deck_idx];
        self.deck_idx += 1;
        card
    }

    pub fn burn(&mut self) {
        self.deck_idx += 1;
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.deck_idx
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.deck_idx = 0;
    }
}

impl Default for Deck {
    fn default() -> Self {
        let mut cards: [Card; 52] = [Card(2, Suit::Club); 52];
        for (i, value) in (2u8..=ACE).enumerate() {
            for (j, suit) in Suit::ALL.into_iter().enumerate() {
                cards[4 * i + j] = Card(value, suit);
            }
        }
        Self { cards, deck_idx: 0 }
    }
}

/// Type alias for whole chips. Stacks and bets never go below zero.
pub type Usd = u32;

/// Type alias for seat positions in the seat table.
pub type SeatIndex = usize;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Blinds {
    pub small: Usd,
    pub big: Usd,
}

impl fmt::Display for Blinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = format!("${}/{}", self.small, self.big);
        write!(f, "{repr}")
    }
}

/// A voluntary action. `Raise` carries the chips put in with the action,
/// call portion included.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Usd),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise(amount) => &format!("raise ${amount}"),
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Action {
    type Err = UserError;

    /// Parses `fold`, `check`, `call` or `raise <amount>` (case-insensitive,
    /// `f`/`x`/`c`/`r` shorthands accepted).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(tag) = words.next() else {
            return Err(UserError::InvalidAction(s.to_string()));
        };
        let action = match tag.to_ascii_lowercase().as_str() {
            "fold" | "f" => Self::Fold,
            "check" | "x" => Self::Check,
            "call" | "c" => Self::Call,
            "raise" | "r" | "bet" | "b" => {
                let amount = words.next().ok_or(UserError::MissingAmount)?;
                let amount: i64 = amount
                    .parse()
                    .map_err(|_| UserError::InvalidAmount(amount.to_string()))?;
                if amount < 0 {
                    return Err(UserError::NegativeAmount(amount));
                }
                let amount =
                    Usd::try_from(amount).map_err(|_| UserError::InvalidAmount(amount.to_string()))?;
                Self::Raise(amount)
            }
            _ => return Err(UserError::InvalidAction(tag.to_string())),
        };
        match words.next() {
            Some(extra) => Err(UserError::InvalidAction(extra.to_string())),
            None => Ok(action),
        }
    }
}

/// Write-once slot for the human's next action. The producer sets it, the
/// table consumes it on a later step. Writing again before the previous
/// action is consumed overwrites it.
#[derive(Clone, Debug, Default)]
pub struct HumanAction {
    action: Option<Action>,
}

impl HumanAction {
    pub fn set(&mut self, action: Action) {
        self.action = Some(action);
    }

    #[must_use]
    pub fn ready(&self) -> bool {
        self.action.is_some()
    }

    pub fn take(&mut self) -> Option<Action> {
        self.action.take()
    }

    pub fn reset(&mut self) {
        self.action = None;
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub name: String,
    pub chips: Usd,
    pub hole_cards: Vec<Card>,
    pub folded: bool,
    pub all_in: bool,
    /// Chips put in during the current betting street.
    pub street_bet: Usd,
    pub is_computer: bool,
    /// Busted in an earlier hand. Such a seat is never dealt in.
    pub eliminated: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: &str, chips: Usd, is_computer: bool) -> Self {
        Self {
            name: name.to_string(),
            chips,
            hole_cards: Vec::with_capacity(2),
            folded: false,
            all_in: false,
            street_bet: 0,
            is_computer,
            eliminated: false,
        }
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.street_bet = 0;
        self.folded = self.eliminated;
        self.all_in = self.eliminated;
    }

    /// Still in the hand and able to act (not folded, not all-in).
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.folded && !self.all_in
    }

    /// Live and holding chips, i.e. able to put more money in.
    #[must_use]
    pub fn can_bet(&self) -> bool {
        self.is_live() && self.chips > 0
    }
}

/// One award-eligible layer of the pot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SidePot {
    pub amount: Usd,
    pub eligible: BTreeSet<SeatIndex>,
}

/// Cumulative contributions of every seat over one hand.
#[derive(Clone, Debug, Default)]
pub struct PotLedger {
    // Map seat indices (players) to their investment in the pot.
    contributions: BTreeMap<SeatIndex, Usd>,
}

impl PotLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-chip bets leave the ledger untouched.
    pub fn add_bet(&mut self, seat_idx: SeatIndex, amount: Usd) {
        if amount == 0 {
            return;
        }
        *self.contributions.entry(seat_idx).or_default() += amount;
    }

    #[must_use]
    pub fn contribution(&self, seat_idx: SeatIndex) -> Usd {
        self.contributions.get(&seat_idx).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total(&self) -> Usd {
        self.contributions.values().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contributions.is_empty()
    }

    pub fn reset(&mut self) {
        self.contributions.clear();
    }

    /// Partition the contributions into side pots, smallest cap first.
    ///
    /// Each layer takes the smallest remaining contribution from every
    /// remaining contributor; contributors that run dry drop out of the
    /// following layers.
    #[must_use]
    pub fn build_pots(&self) -> Vec<SidePot> {
        let mut remaining = self.contributions.clone();
        let mut pots = Vec::new();
        while let Some(&layer) = remaining.values().min() {
            let eligible: BTreeSet<SeatIndex> = remaining.keys().copied().collect();
            pots.push(SidePot {
                amount: layer * eligible.len() as Usd,
                eligible,
            });
            remaining.retain(|_, amount| {
                *amount -= layer;
                *amount > 0
            });
        }
        pots
    }
}
