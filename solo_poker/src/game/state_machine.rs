//! Hand state machine: the data every street shares, the events it emits,
//! and the enum that dispatches over the per-street state types.

use enum_dispatch::enum_dispatch;
use log::debug;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};
use thiserror::Error;

use super::{
    betting::{Applied, BettingRound},
    constants::{HUMAN_NAME, HUMAN_SEAT},
    entities::{
        Action, Blinds, Card, Deck, HandScore, HumanAction, Player, PotLedger, SeatIndex, Usd,
    },
    states::{
        BettingFlop, BettingPreflop, BettingRiver, BettingTurn, DealFlop, DealHole, DealRiver,
        DealTurn, EndHand, NewHand, Phase, PostBlinds, Showdown,
    },
    transitions::{BettingPhase, TurnOutcome},
};
use crate::{bot::Decide, table::GameSettings};

/// Errors caused by human input. None of them change the table state.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum UserError {
    #[error("unknown action `{0}`")]
    InvalidAction(String),
    #[error("amount can't be negative (got {0})")]
    NegativeAmount(i64),
    #[error("invalid amount `{0}`")]
    InvalidAmount(String),
    #[error("raise needs an amount")]
    MissingAmount,
    #[error("can't check, ${to_call} to call")]
    CannotCheck { to_call: Usd },
    #[error("not your turn")]
    OutOfTurnAction,
    #[error("session is over")]
    SessionOver,
}

/// How a session ended, from the human's point of view.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Outcome {
    HumanWon,
    HumanLost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HumanWon => write!(f, "you won the table"),
            Self::HumanLost => write!(f, "you're out of chips"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Street {
    NewHand,
    PostBlinds,
    DealHole,
    BettingPreflop,
    DealFlop,
    BettingFlop,
    DealTurn,
    BettingTurn,
    DealRiver,
    BettingRiver,
    Showdown,
    EndHand,
}

impl Street {
    #[must_use]
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Self::BettingPreflop | Self::BettingFlop | Self::BettingTurn | Self::BettingRiver
        )
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::NewHand => "new hand",
            Self::PostBlinds => "blinds",
            Self::DealHole => "hole cards",
            Self::BettingPreflop => "preflop",
            Self::DealFlop => "flop",
            Self::BettingFlop => "flop betting",
            Self::DealTurn => "turn",
            Self::BettingTurn => "turn betting",
            Self::DealRiver => "river",
            Self::BettingRiver => "river betting",
            Self::Showdown => "showdown",
            Self::EndHand => "end of hand",
        };
        write!(f, "{repr}")
    }
}

/// Notifications for whatever renders the table. They never feed back
/// into the game.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum GameEvent {
    HandStarted { hand_no: u32, dealer: String },
    PostedBlind { name: String, amount: Usd, big: bool },
    /// The human's hole cards. Computer cards stay hidden until revealed.
    DealtHole { cards: Vec<Card> },
    Board { street: Street, cards: Vec<Card> },
    TurnTo { name: String, to_call: Usd },
    Acted { name: String, applied: Applied, all_in: bool },
    Runout,
    FoldOutWin { name: String, amount: Usd },
    Showdown { name: String, cards: Vec<Card>, score: HandScore },
    PotAwarded { name: String, amount: Usd, pot_idx: usize },
    Rejected { reason: String },
    Eliminated { name: String },
    ButtonMoved { name: String },
    SessionOver(Outcome),
}

fn cards_repr(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect::<Vec<_>>().join("")
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::HandStarted { hand_no, dealer } => {
                format!("--- hand #{hand_no}, {dealer} has the button ---")
            }
            Self::PostedBlind { name, amount, big } => {
                let blind = if *big { "big" } else { "small" };
                format!("{name} posts the {blind} blind ${amount}")
            }
            Self::DealtHole { cards } => format!("you're dealt{}", cards_repr(cards)),
            Self::Board { street, cards } => format!("{street}:{}", cards_repr(cards)),
            Self::TurnTo { name, to_call } => format!("{name} to act, ${to_call} to call"),
            Self::Acted {
                name,
                applied,
                all_in,
            } => {
                if *all_in {
                    format!("{name} {applied} (all-in)")
                } else {
                    format!("{name} {applied}")
                }
            }
            Self::Runout => "no more betting, running out the board".to_string(),
            Self::FoldOutWin { name, amount } => {
                format!("{name} wins ${amount} (everyone else folded)")
            }
            Self::Showdown { name, cards, score } => {
                format!("{name} shows{} ({score})", cards_repr(cards))
            }
            Self::PotAwarded {
                name,
                amount,
                pot_idx,
            } => {
                if *pot_idx == 0 {
                    format!("{name} wins ${amount}")
                } else {
                    format!("{name} wins ${amount} from side pot #{pot_idx}")
                }
            }
            Self::Rejected { reason } => format!("rejected: {reason}"),
            Self::Eliminated { name } => format!("{name} is out of chips"),
            Self::ButtonMoved { name } => format!("button moves to {name}"),
            Self::SessionOver(outcome) => format!("*** game over, {outcome} ***"),
        };
        write!(f, "{repr}")
    }
}

/// Mutable data shared across all streets of all hands.
#[derive(Debug)]
pub struct GameData {
    /// Deck of cards. This is instantiated once and reshuffled each hand.
    pub(super) deck: Deck,
    pub(super) rng: StdRng,
    pub blinds: Blinds,
    pub players: Vec<Player>,
    /// Decision makers indexed by seat. The human seat has none.
    pub(super) deciders: Vec<Option<Box<dyn Decide>>>,
    pub(super) human: HumanAction,
    /// Community cards shared amongst all players.
    pub board: Vec<Card>,
    pub ledger: PotLedger,
    pub dealer_idx: SeatIndex,
    pub hand_no: u32,
    /// No more betting is possible this hand; deal straight to showdown.
    pub runout: bool,
    /// Show computer hole cards to the human.
    pub reveal_all: bool,
    /// Set while the human's turn is open, to what they have to call.
    pub waiting_for_human: Option<Usd>,
    /// The hand is over and the table waits for `start_next_hand`.
    pub next_hand_pending: bool,
    pub outcome: Option<Outcome>,
    /// Chips on the table when the hand started. Nothing may create or
    /// destroy chips until the next hand.
    pub(super) chips_at_start: Usd,
    pub(super) events: VecDeque<GameEvent>,
}

impl Default for GameData {
    /// An idle table holding only the human. Used as a placeholder while
    /// the real state is being stepped.
    fn default() -> Self {
        Self::new(&GameSettings::default(), Vec::new(), StdRng::seed_from_u64(0))
    }
}

impl GameData {
    /// Seat the human first, then one computer seat per decider.
    #[must_use]
    pub fn new(settings: &GameSettings, deciders: Vec<Box<dyn Decide>>, rng: StdRng) -> Self {
        let num_seats = deciders.len() + 1;
        let mut players = Vec::with_capacity(num_seats);
        players.push(Player::new(HUMAN_NAME, settings.starting_chips, false));
        let mut seat_deciders: Vec<Option<Box<dyn Decide>>> = Vec::with_capacity(num_seats);
        seat_deciders.push(None);
        for (i, decider) in deciders.into_iter().enumerate() {
            players.push(Player::new(&format!("AI{}", i + 1), settings.starting_chips, true));
            seat_deciders.push(Some(decider));
        }
        let chips_at_start = players.iter().map(|player| player.chips).sum();
        Self {
            deck: Deck::default(),
            rng,
            blinds: Blinds {
                small: settings.small_blind(),
                big: settings.big_blind,
            },
            players,
            deciders: seat_deciders,
            human: HumanAction::default(),
            board: Vec::with_capacity(5),
            ledger: PotLedger::new(),
            dealer_idx: 0,
            hand_no: 0,
            runout: false,
            reveal_all: false,
            waiting_for_human: None,
            next_hand_pending: false,
            outcome: None,
            chips_at_start,
            events: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn human(&self) -> &Player {
        &self.players[HUMAN_SEAT]
    }

    pub fn set_human_action(&mut self, action: Action) {
        self.human.set(action);
    }

    /// Chips in stacks plus chips in the pot.
    #[must_use]
    pub fn chips_in_play(&self) -> Usd {
        self.players.iter().map(|player| player.chips).sum::<Usd>() + self.ledger.total()
    }

    /// Panics if chips were created or destroyed since the hand started.
    pub(super) fn assert_chips_conserved(&self) {
        assert_eq!(
            self.chips_in_play(),
            self.chips_at_start,
            "chip conservation violated: stacks {:?}, pot ${}",
            self.players.iter().map(|p| p.chips).collect::<Vec<_>>(),
            self.ledger.total()
        );
    }

    /// Enter runout mode once at least two seats are in the hand and at
    /// most one of them can still put chips in.
    pub(super) fn check_runout(&mut self) {
        if self.runout {
            return;
        }
        let in_hand = self.players.iter().filter(|p| !p.folded).count();
        let can_bet = self.players.iter().filter(|p| p.can_bet()).count();
        if in_hand >= 2 && can_bet <= 1 {
            debug!("entering runout with {in_hand} seats in the hand");
            self.runout = true;
            self.reveal_all = true;
            self.events.push_back(GameEvent::Runout);
        }
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Remove seats that busted in the last hand, keeping the decider
    /// table aligned with the seat table.
    pub(super) fn drop_eliminated(&mut self) {
        let (players, deciders) = std::mem::take(&mut self.players)
            .into_iter()
            .zip(std::mem::take(&mut self.deciders))
            .filter(|(player, _)| !player.eliminated)
            .unzip();
        self.players = players;
        self.deciders = deciders;
    }
}

/// Trait for reading and draining a hand state, whatever street it is in.
#[enum_dispatch]
pub trait HandStateManagement {
    fn street(&self) -> Street;

    fn data(&self) -> &GameData;

    fn data_mut(&mut self) -> &mut GameData;

    fn drain_events(&mut self) -> VecDeque<GameEvent>;
}

/// A hand of poker: the shared data plus the state for one street.
#[derive(Debug)]
pub struct Game<T> {
    pub data: GameData,
    pub state: T,
}

impl<T: Phase> HandStateManagement for Game<T> {
    fn street(&self) -> Street {
        T::STREET
    }

    fn data(&self) -> &GameData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut GameData {
        &mut self.data
    }

    fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.data.drain_events()
    }
}

/// Every street a hand can be in.
#[enum_dispatch(HandStateManagement)]
#[derive(Debug)]
pub enum HandState {
    NewHand(Game<NewHand>),
    PostBlinds(Game<PostBlinds>),
    DealHole(Game<DealHole>),
    BettingPreflop(Game<BettingPreflop>),
    DealFlop(Game<DealFlop>),
    BettingFlop(Game<BettingFlop>),
    DealTurn(Game<DealTurn>),
    BettingTurn(Game<BettingTurn>),
    DealRiver(Game<DealRiver>),
    BettingRiver(Game<BettingRiver>),
    Showdown(Game<Showdown>),
    EndHand(Game<EndHand>),
}

impl Default for HandState {
    fn default() -> Self {
        Self::NewHand(Game::new(GameData::default()))
    }
}

impl HandState {
    /// A fresh table sitting before its first hand.
    #[must_use]
    pub fn new(data: GameData) -> Self {
        Self::NewHand(Game::new(data))
    }

    /// The betting round in progress, if the hand is on a betting street.
    #[must_use]
    pub fn round(&self) -> Option<&BettingRound> {
        match self {
            Self::BettingPreflop(game) => Some(game.state.round()),
            Self::BettingFlop(game) => Some(game.state.round()),
            Self::BettingTurn(game) => Some(game.state.round()),
            Self::BettingRiver(game) => Some(game.state.round()),
            _ => None,
        }
    }

    /// Perform one unit of work and move to the next street if the
    /// current one is done. Betting streets stay put until their round
    /// completes; the end of a hand only moves on once the table has
    /// cleared `next_hand_pending`.
    #[must_use]
    pub fn step(self) -> Self {
        let from = self.street();
        let next: Self = match self {
            Self::NewHand(game) => Self::PostBlinds(game.into()),
            Self::PostBlinds(game) => Self::DealHole(game.into()),
            Self::DealHole(game) => Self::BettingPreflop(game.into()),
            Self::BettingPreflop(mut game) => match game.take_turn() {
                TurnOutcome::Pending => Self::BettingPreflop(game),
                TurnOutcome::FoldOut => Self::EndHand(game.fold_out()),
                TurnOutcome::Complete => Self::DealFlop(game.into()),
            },
            Self::DealFlop(game) => {
                if game.data.runout {
                    Self::DealTurn(game.into())
                } else {
                    Self::BettingFlop(game.into())
                }
            }
            Self::BettingFlop(mut game) => match game.take_turn() {
                TurnOutcome::Pending => Self::BettingFlop(game),
                TurnOutcome::FoldOut => Self::EndHand(game.fold_out()),
                TurnOutcome::Complete => Self::DealTurn(game.into()),
            },
            Self::DealTurn(game) => {
                if game.data.runout {
                    Self::DealRiver(game.into())
                } else {
                    Self::BettingTurn(game.into())
                }
            }
            Self::BettingTurn(mut game) => match game.take_turn() {
                TurnOutcome::Pending => Self::BettingTurn(game),
                TurnOutcome::FoldOut => Self::EndHand(game.fold_out()),
                TurnOutcome::Complete => Self::DealRiver(game.into()),
            },
            Self::DealRiver(game) => {
                if game.data.runout {
                    Self::Showdown(game.into())
                } else {
                    Self::BettingRiver(game.into())
                }
            }
            Self::BettingRiver(mut game) => match game.take_turn() {
                TurnOutcome::Pending => Self::BettingRiver(game),
                TurnOutcome::FoldOut => Self::EndHand(game.fold_out()),
                TurnOutcome::Complete => Self::Showdown(game.into()),
            },
            Self::Showdown(game) => Self::EndHand(game.into()),
            Self::EndHand(game) => {
                if game.data.next_hand_pending || game.data.outcome.is_some() {
                    Self::EndHand(game)
                } else {
                    Self::NewHand(game.into())
                }
            }
        };
        if next.street() != from {
            debug!("{from} -> {}", next.street());
        }
        next
    }
}
