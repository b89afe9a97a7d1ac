//! The table a host drives: one human, its computer opponents and the
//! hand state machine between them.

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

use super::{
    config::{ConfigError, GameSettings},
    messages::{SeatView, StepResult, TableView},
};
use crate::{
    bot::{Bot, Decide},
    game::{
        GameData, GameEvent, HandState, HandStateManagement, Outcome, Street, UserError,
        constants::{HUMAN_SEAT, MAX_BOTS, MIN_BOTS},
        entities::{Action, Player, Usd},
    },
};

/// A single-table session. Nothing happens unless the host calls
/// [`Table::advance`]; each call does at most one unit of work.
#[derive(Debug)]
pub struct Table {
    state: HandState,
    settings: GameSettings,
}

impl Table {
    /// A table with unseeded bots, for real play.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        let settings = settings.normalized();
        let deciders = (0..settings.num_bots)
            .map(|_| Box::new(Bot::new(settings.difficulty)) as Box<dyn Decide>)
            .collect();
        Self::build(settings, deciders, StdRng::from_os_rng())
    }

    /// A fully reproducible table: the deck and every bot are seeded.
    #[must_use]
    pub fn with_seed(settings: GameSettings, seed: u64) -> Self {
        let settings = settings.normalized();
        let deciders = (0..settings.num_bots)
            .map(|i| {
                let bot_seed = seed.wrapping_add(1 + i as u64);
                Box::new(Bot::seeded(settings.difficulty, bot_seed)) as Box<dyn Decide>
            })
            .collect();
        Self::build(settings, deciders, StdRng::seed_from_u64(seed))
    }

    /// A table whose computer seats are played by the given deciders, one
    /// seat each. The bot count in `settings` is ignored.
    pub fn with_deciders(
        settings: GameSettings,
        deciders: Vec<Box<dyn Decide>>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if !(MIN_BOTS..=MAX_BOTS).contains(&deciders.len()) {
            return Err(ConfigError::InvalidSeatCount(deciders.len()));
        }
        let settings = GameSettings {
            num_bots: deciders.len(),
            ..settings
        }
        .normalized();
        Ok(Self::build(settings, deciders, StdRng::seed_from_u64(seed)))
    }

    fn build(settings: GameSettings, deciders: Vec<Box<dyn Decide>>, rng: StdRng) -> Self {
        info!(
            "new table: {} {} bots, ${} stacks, blinds ${}/${}",
            settings.num_bots,
            settings.difficulty,
            settings.starting_chips,
            settings.small_blind(),
            settings.big_blind
        );
        let data = GameData::new(&settings, deciders, rng);
        Self {
            state: HandState::new(data),
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// Do one unit of work and report what the table is waiting for.
    pub fn advance(&mut self) -> StepResult {
        let data = self.state.data();
        if let Some(outcome) = data.outcome {
            return StepResult::SessionOver(outcome);
        }
        if data.next_hand_pending {
            return StepResult::WaitingNextHand;
        }

        let state = std::mem::take(&mut self.state);
        self.state = state.step();

        let data = self.state.data();
        if let Some(outcome) = data.outcome {
            StepResult::SessionOver(outcome)
        } else if let Some(to_call) = data.waiting_for_human {
            StepResult::AwaitingHuman { to_call }
        } else {
            StepResult::Stepped(self.state.street())
        }
    }

    /// Hand the human's action to the table. It is applied (or rejected
    /// with a `Rejected` event) on the next `advance`. Submitting twice
    /// before that replaces the earlier action.
    pub fn submit(&mut self, action: Action) -> Result<(), UserError> {
        let data = self.state.data();
        if data.outcome.is_some() {
            return Err(UserError::SessionOver);
        }
        if data.waiting_for_human.is_none() {
            return Err(UserError::OutOfTurnAction);
        }
        debug!("human submits {action}");
        self.state.data_mut().set_human_action(action);
        Ok(())
    }

    /// Parse a typed command (`fold`, `check`, `call`, `raise 100`) and
    /// submit it.
    pub fn submit_command(&mut self, command: &str) -> Result<(), UserError> {
        let action = command.parse::<Action>().inspect_err(|err| {
            warn!("can't parse `{command}`: {err}");
        })?;
        self.submit(action)
    }

    /// What the human has to call, if the table is waiting on them.
    #[must_use]
    pub fn awaiting_human(&self) -> Option<Usd> {
        self.state.data().waiting_for_human
    }

    #[must_use]
    pub fn next_hand_pending(&self) -> bool {
        self.state.data().next_hand_pending
    }

    /// End the pause after a hand. Does nothing if no pause is pending.
    pub fn start_next_hand(&mut self) {
        let data = self.state.data_mut();
        if data.next_hand_pending && data.outcome.is_none() {
            debug!("next hand released");
            data.next_hand_pending = false;
        }
    }

    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        self.state.drain_events()
    }

    #[must_use]
    pub fn street(&self) -> Street {
        self.state.street()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.data().outcome
    }

    #[must_use]
    pub fn data(&self) -> &GameData {
        self.state.data()
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.state.data().players
    }

    /// Snapshot of everything the human may see.
    #[must_use]
    pub fn view(&self) -> TableView {
        let data = self.state.data();
        let round = self.state.round();
        let seats = data
            .players
            .iter()
            .enumerate()
            .map(|(seat_idx, player)| {
                let visible = seat_idx == HUMAN_SEAT || (data.reveal_all && !player.folded);
                SeatView {
                    name: player.name.clone(),
                    chips: player.chips,
                    street_bet: player.street_bet,
                    folded: player.folded,
                    all_in: player.all_in,
                    is_dealer: seat_idx == data.dealer_idx,
                    is_turn: round.is_some_and(|round| round.turn_idx == seat_idx),
                    hole_cards: (visible && !player.hole_cards.is_empty())
                        .then(|| player.hole_cards.clone()),
                }
            })
            .collect();
        TableView {
            hand_no: data.hand_no,
            street: self.state.street(),
            seats,
            board: data.board.clone(),
            pot: data.ledger.total(),
            current_bet: round.map_or(0, |round| round.current_bet),
            small_blind: data.blinds.small,
            big_blind: data.blinds.big,
            to_call: data.waiting_for_human,
        }
    }
}
