//! Street transitions for the hand FSM.
//!
//! Every edge of the state machine is a `From` impl between two `Game`
//! states; the work of a street happens when the game leaves it. Betting
//! streets additionally resolve one seat per step through
//! [`Game::take_turn`].

use log::{debug, error, info, warn};

use super::{
    betting::{Applied, BettingRound},
    constants::{FLOP_CARDS, HUMAN_SEAT, RIVER_CARDS, TURN_CARDS},
    entities::{Action, Card, HandScore, SeatIndex, Usd},
    functional::{award, eval_best, eval_seven},
    state_machine::{Game, GameData, GameEvent, Outcome, Street, UserError},
    states::{
        BettingFlop, BettingPreflop, BettingRiver, BettingTurn, DealFlop, DealHole, DealRiver,
        DealTurn, EndHand, NewHand, PostBlinds, Showdown,
    },
};

/// What a single betting step did to its street.
#[derive(Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    /// The round goes on (a seat acted, was skipped, or the human is
    /// being waited on).
    Pending,
    /// Everyone in the hand has matched the bet and acted.
    Complete,
    /// One seat is left; it takes the whole pot without a showdown.
    FoldOut,
}

/// A street with a betting round in progress.
pub trait BettingPhase {
    fn round(&self) -> &BettingRound;

    fn round_mut(&mut self) -> &mut BettingRound;
}

impl BettingPhase for BettingPreflop {
    fn round(&self) -> &BettingRound {
        &self.round
    }

    fn round_mut(&mut self) -> &mut BettingRound {
        &mut self.round
    }
}

impl BettingPhase for BettingFlop {
    fn round(&self) -> &BettingRound {
        &self.round
    }

    fn round_mut(&mut self) -> &mut BettingRound {
        &mut self.round
    }
}

impl BettingPhase for BettingTurn {
    fn round(&self) -> &BettingRound {
        &self.round
    }

    fn round_mut(&mut self) -> &mut BettingRound {
        &mut self.round
    }
}

impl BettingPhase for BettingRiver {
    fn round(&self) -> &BettingRound {
        &self.round
    }

    fn round_mut(&mut self) -> &mut BettingRound {
        &mut self.round
    }
}

/// A computer seat answered with something it can't do. Fix it up rather
/// than stall the table.
fn normalize_computer_action(name: &str, action: Action, to_call: Usd) -> Action {
    match action {
        Action::Check if to_call > 0 => {
            warn!("{name} tried to check facing ${to_call}, calling instead");
            Action::Call
        }
        Action::Call if to_call == 0 => Action::Check,
        action => action,
    }
}

/// Human input is held to the rules; an illegal action is bounced back
/// and the turn stays open.
fn validate_human_action(action: Action, to_call: Usd) -> Result<Action, UserError> {
    match action {
        Action::Check if to_call > 0 => Err(UserError::CannotCheck { to_call }),
        Action::Call if to_call == 0 => Ok(Action::Check),
        action => Ok(action),
    }
}

impl GameData {
    fn num_seats(&self) -> usize {
        self.players.len()
    }

    /// First seat to the left of the button.
    fn first_seat(&self) -> SeatIndex {
        (self.dealer_idx + 1) % self.num_seats()
    }

    /// Post a forced bet, capped at the seat's stack. Returns what was
    /// actually posted.
    fn post_blind(&mut self, seat_idx: SeatIndex, amount: Usd, big: bool) -> Usd {
        let player = &mut self.players[seat_idx];
        let posted = amount.min(player.chips);
        player.chips -= posted;
        player.street_bet += posted;
        if player.chips == 0 {
            player.all_in = true;
        }
        let name = player.name.clone();
        self.ledger.add_bet(seat_idx, posted);
        debug!("{name} posts ${posted} (asked ${amount})");
        self.push_event(GameEvent::PostedBlind {
            name,
            amount: posted,
            big,
        });
        posted
    }

    fn deal_board(&mut self, num_cards: usize, street: Street) {
        self.deck.burn();
        for _ in 0..num_cards {
            let card = self.deck.draw();
            self.board.push(card);
        }
        debug!("{street}: {:?}", self.board);
        self.push_event(GameEvent::Board {
            street,
            cards: self.board.clone(),
        });
    }

    /// Postflop rounds open with the first seat left of the button.
    fn open_round(&mut self) -> BettingRound {
        for player in &mut self.players {
            player.street_bet = 0;
        }
        BettingRound::new(self.num_seats(), self.first_seat(), self.blinds.big)
    }

    fn computer_action(&mut self, seat_idx: SeatIndex, to_call: Usd) -> Action {
        let big_blind = self.blinds.big;
        let player = &self.players[seat_idx];
        let action = match self.deciders.get_mut(seat_idx).and_then(Option::as_mut) {
            Some(decider) => decider.decide(player, to_call, big_blind),
            None => {
                error!("no decider for computer seat {seat_idx}, playing passively");
                if to_call == 0 { Action::Check } else { Action::Call }
            }
        };
        normalize_computer_action(&player.name, action, to_call)
    }

    /// Settle the seat list after the pot has been paid out: eliminate
    /// busted seats, decide whether the session is over, and otherwise
    /// move the button and wait for the next hand.
    fn finish_hand(&mut self) {
        self.waiting_for_human = None;
        self.human.reset();

        let mut busted = Vec::new();
        for player in &mut self.players {
            if player.chips == 0 && !player.eliminated {
                player.eliminated = true;
                busted.push(player.name.clone());
            }
        }
        for name in busted {
            info!("{name} is eliminated");
            self.push_event(GameEvent::Eliminated { name });
        }

        let outcome = if self.players[HUMAN_SEAT].eliminated {
            Some(Outcome::HumanLost)
        } else if self.players.iter().filter(|p| !p.eliminated).count() == 1 {
            Some(Outcome::HumanWon)
        } else {
            None
        };
        if let Some(outcome) = outcome {
            info!("session over after {} hands: {outcome}", self.hand_no);
            self.outcome = Some(outcome);
            self.push_event(GameEvent::SessionOver(outcome));
            return;
        }

        // The button goes to the next seat that is still in the game.
        let num_seats = self.num_seats();
        let next_dealer = (1..=num_seats)
            .map(|offset| (self.dealer_idx + offset) % num_seats)
            .find(|&seat_idx| !self.players[seat_idx].eliminated)
            .unwrap_or(HUMAN_SEAT);
        self.dealer_idx = self.players[..next_dealer]
            .iter()
            .filter(|player| !player.eliminated)
            .count();
        self.drop_eliminated();

        let name = self.players[self.dealer_idx].name.clone();
        debug!("button moves to {name}");
        self.push_event(GameEvent::ButtonMoved { name });
        self.next_hand_pending = true;
    }
}

impl Game<NewHand> {
    #[must_use]
    pub fn new(data: GameData) -> Self {
        Self {
            data,
            state: NewHand {},
        }
    }
}

impl<T: BettingPhase> Game<T> {
    /// Resolve one step of the betting round: the fold-out check, the
    /// completion check, or a single seat's turn.
    pub fn take_turn(&mut self) -> TurnOutcome {
        let data = &mut self.data;
        let round = self.state.round_mut();

        if data.players.iter().filter(|p| !p.folded).count() <= 1 {
            return TurnOutcome::FoldOut;
        }

        if round.is_complete(&data.players) {
            data.waiting_for_human = None;
            for player in &mut data.players {
                player.street_bet = 0;
            }
            data.check_runout();
            return TurnOutcome::Complete;
        }

        let seat_idx = round.turn_idx;
        if !data.players[seat_idx].is_live() {
            round.next_player();
            return TurnOutcome::Pending;
        }

        let to_call = round.to_call(&data.players[seat_idx]);
        let action = if data.players[seat_idx].is_computer {
            data.computer_action(seat_idx, to_call)
        } else {
            let Some(action) = data.human.take() else {
                if data.waiting_for_human.is_none() {
                    let name = data.players[seat_idx].name.clone();
                    data.push_event(GameEvent::TurnTo { name, to_call });
                }
                data.waiting_for_human = Some(to_call);
                return TurnOutcome::Pending;
            };
            match validate_human_action(action, to_call) {
                Ok(action) => action,
                Err(err) => {
                    warn!("rejected human action: {err}");
                    data.push_event(GameEvent::Rejected {
                        reason: err.to_string(),
                    });
                    return TurnOutcome::Pending;
                }
            }
        };
        data.waiting_for_human = None;

        let applied = round.apply(&mut data.players, &mut data.ledger, seat_idx, &action);
        data.assert_chips_conserved();

        let player = &data.players[seat_idx];
        let all_in = player.all_in && !matches!(applied, Applied::Fold | Applied::Check);
        debug!("{} {applied} (asked {action})", player.name);
        let name = player.name.clone();
        data.push_event(GameEvent::Acted {
            name,
            applied,
            all_in,
        });

        data.check_runout();
        round.next_player();
        TurnOutcome::Pending
    }

    /// Everyone else folded: the last seat in the hand takes the pot
    /// without showing.
    #[must_use]
    pub fn fold_out(self) -> Game<EndHand> {
        let mut data = self.data;
        match data.players.iter().position(|p| !p.folded) {
            Some(seat_idx) => {
                let amount = data.ledger.total();
                data.players[seat_idx].chips += amount;
                data.ledger.reset();
                let name = data.players[seat_idx].name.clone();
                info!("{name} wins ${amount} uncontested");
                data.push_event(GameEvent::FoldOutWin { name, amount });
            }
            None => error!("fold-out with no seat left in the hand"),
        }
        data.reveal_all = true;
        data.assert_chips_conserved();
        data.finish_hand();
        Game {
            data,
            state: EndHand {},
        }
    }
}

impl From<Game<NewHand>> for Game<PostBlinds> {
    fn from(mut value: Game<NewHand>) -> Self {
        let data = &mut value.data;
        data.hand_no += 1;
        data.runout = false;
        data.reveal_all = false;
        data.waiting_for_human = None;
        data.human.reset();
        data.deck.shuffle(&mut data.rng);
        data.board.clear();
        data.ledger.reset();
        for player in &mut data.players {
            player.reset_for_new_hand();
        }
        data.chips_at_start = data.chips_in_play();

        let dealer = data.players[data.dealer_idx].name.clone();
        info!(
            "hand #{} with {} seats, {dealer} has the button",
            data.hand_no,
            data.players.len()
        );
        data.push_event(GameEvent::HandStarted {
            hand_no: data.hand_no,
            dealer,
        });
        Self {
            data: value.data,
            state: PostBlinds {},
        }
    }
}

impl From<Game<PostBlinds>> for Game<DealHole> {
    fn from(mut value: Game<PostBlinds>) -> Self {
        let data = &mut value.data;
        let num_seats = data.num_seats();
        let dealer_idx = data.dealer_idx;
        // Heads-up the button posts the small blind and acts first preflop.
        let (sb_idx, bb_idx, first_idx) = if num_seats == 2 {
            (dealer_idx, dealer_idx + 1, dealer_idx)
        } else {
            (dealer_idx + 1, dealer_idx + 2, dealer_idx + 3)
        };
        let (small, big) = (data.blinds.small, data.blinds.big);
        let sb_posted = data.post_blind(sb_idx % num_seats, small, false);
        let bb_posted = data.post_blind(bb_idx % num_seats, big, true);

        let mut round = BettingRound::new(num_seats, first_idx % num_seats, big);
        round.current_bet = sb_posted.max(bb_posted);
        data.assert_chips_conserved();
        data.check_runout();
        Self {
            data: value.data,
            state: DealHole { round },
        }
    }
}

impl From<Game<DealHole>> for Game<BettingPreflop> {
    fn from(mut value: Game<DealHole>) -> Self {
        let data = &mut value.data;
        let num_seats = data.num_seats();
        let first_seat = data.first_seat();
        for _ in 0..2 {
            for offset in 0..num_seats {
                let seat_idx = (first_seat + offset) % num_seats;
                if data.players[seat_idx].eliminated {
                    continue;
                }
                let card = data.deck.draw();
                data.players[seat_idx].hole_cards.push(card);
            }
        }
        let cards = data.players[HUMAN_SEAT].hole_cards.clone();
        debug!("human holds {cards:?}");
        data.push_event(GameEvent::DealtHole { cards });
        Self {
            data: value.data,
            state: BettingPreflop {
                round: value.state.round,
            },
        }
    }
}

impl From<Game<BettingPreflop>> for Game<DealFlop> {
    fn from(value: Game<BettingPreflop>) -> Self {
        Self {
            data: value.data,
            state: DealFlop {},
        }
    }
}

impl From<Game<DealFlop>> for Game<BettingFlop> {
    fn from(mut value: Game<DealFlop>) -> Self {
        value.data.deal_board(FLOP_CARDS, Street::DealFlop);
        let round = value.data.open_round();
        Self {
            data: value.data,
            state: BettingFlop { round },
        }
    }
}

impl From<Game<DealFlop>> for Game<DealTurn> {
    fn from(mut value: Game<DealFlop>) -> Self {
        value.data.deal_board(FLOP_CARDS, Street::DealFlop);
        Self {
            data: value.data,
            state: DealTurn {},
        }
    }
}

impl From<Game<BettingFlop>> for Game<DealTurn> {
    fn from(value: Game<BettingFlop>) -> Self {
        Self {
            data: value.data,
            state: DealTurn {},
        }
    }
}

impl From<Game<DealTurn>> for Game<BettingTurn> {
    fn from(mut value: Game<DealTurn>) -> Self {
        value.data.deal_board(TURN_CARDS, Street::DealTurn);
        let round = value.data.open_round();
        Self {
            data: value.data,
            state: BettingTurn { round },
        }
    }
}

impl From<Game<DealTurn>> for Game<DealRiver> {
    fn from(mut value: Game<DealTurn>) -> Self {
        value.data.deal_board(TURN_CARDS, Street::DealTurn);
        Self {
            data: value.data,
            state: DealRiver {},
        }
    }
}

impl From<Game<BettingTurn>> for Game<DealRiver> {
    fn from(value: Game<BettingTurn>) -> Self {
        Self {
            data: value.data,
            state: DealRiver {},
        }
    }
}

impl From<Game<DealRiver>> for Game<BettingRiver> {
    fn from(mut value: Game<DealRiver>) -> Self {
        value.data.deal_board(RIVER_CARDS, Street::DealRiver);
        let round = value.data.open_round();
        Self {
            data: value.data,
            state: BettingRiver { round },
        }
    }
}

impl From<Game<DealRiver>> for Game<Showdown> {
    fn from(mut value: Game<DealRiver>) -> Self {
        value.data.deal_board(RIVER_CARDS, Street::DealRiver);
        Self {
            data: value.data,
            state: Showdown {},
        }
    }
}

impl From<Game<BettingRiver>> for Game<Showdown> {
    fn from(value: Game<BettingRiver>) -> Self {
        Self {
            data: value.data,
            state: Showdown {},
        }
    }
}

impl From<Game<Showdown>> for Game<EndHand> {
    fn from(mut value: Game<Showdown>) -> Self {
        let data = &mut value.data;

        let mut scores: Vec<Option<HandScore>> = Vec::with_capacity(data.num_seats());
        for player in &data.players {
            if player.folded {
                scores.push(None);
                continue;
            }
            let cards: Vec<Card> = player.hole_cards.iter().chain(&data.board).copied().collect();
            let score = match <[Card; 7]>::try_from(cards.as_slice()) {
                Ok(seven) => Some(eval_seven(&seven)),
                Err(_) => eval_best(&cards),
            };
            scores.push(score);
        }
        let reveals: Vec<GameEvent> = data
            .players
            .iter()
            .zip(&scores)
            .filter_map(|(player, score)| {
                score.as_ref().map(|score| GameEvent::Showdown {
                    name: player.name.clone(),
                    cards: player.hole_cards.clone(),
                    score: score.clone(),
                })
            })
            .collect();
        for event in reveals {
            data.push_event(event);
        }

        let pots = data.ledger.build_pots();
        let awards = award(&pots, &scores, data.first_seat());
        let awarded: Usd = awards.iter().map(|award| award.amount).sum();
        assert_eq!(
            awarded,
            data.ledger.total(),
            "awards don't cover the pot: {pots:?}"
        );
        for award in awards {
            let player = &mut data.players[award.seat_idx];
            player.chips += award.amount;
            let name = player.name.clone();
            info!("{name} wins ${} from pot #{}", award.amount, award.pot_idx);
            data.push_event(GameEvent::PotAwarded {
                name,
                amount: award.amount,
                pot_idx: award.pot_idx,
            });
        }

        data.ledger.reset();
        data.reveal_all = true;
        data.assert_chips_conserved();
        data.finish_hand();
        Self {
            data: value.data,
            state: EndHand {},
        }
    }
}

impl From<Game<EndHand>> for Game<NewHand> {
    fn from(value: Game<EndHand>) -> Self {
        Self::new(value.data)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{
        bot::Decide,
        game::{
            entities::{Player, Suit::*},
            state_machine::{HandState, HandStateManagement},
        },
        table::GameSettings,
    };

    /// Always answers the same way.
    #[derive(Debug)]
    struct Always(Action);

    impl Decide for Always {
        fn decide(&mut self, _: &Player, _: Usd, _: Usd) -> Action {
            self.0.clone()
        }
    }

    /// A table where every seat, the first one included, is played by a
    /// scripted decider, so hands run without human input.
    fn scripted(stacks: &[Usd], actions: &[Action]) -> GameData {
        let settings = GameSettings {
            num_bots: stacks.len() - 1,
            ..Default::default()
        };
        let deciders: Vec<Box<dyn Decide>> = actions[1..]
            .iter()
            .map(|action| Box::new(Always(action.clone())) as Box<dyn Decide>)
            .collect();
        let mut data = GameData::new(&settings, deciders, StdRng::seed_from_u64(5));
        data.players[HUMAN_SEAT].is_computer = true;
        data.deciders[HUMAN_SEAT] = Some(Box::new(Always(actions[0].clone())));
        for (player, &chips) in data.players.iter_mut().zip(stacks) {
            player.chips = chips;
        }
        data.chips_at_start = data.chips_in_play();
        data
    }

    /// Step until the hand ends, returning every street visited.
    fn run_hand(mut state: HandState) -> (HandState, Vec<Street>) {
        let mut streets = vec![state.street()];
        for _ in 0..500 {
            state = state.step();
            assert_eq!(state.street().is_betting(), state.round().is_some());
            if streets.last() != Some(&state.street()) {
                streets.push(state.street());
            }
            if state.street() == Street::EndHand {
                return (state, streets);
            }
        }
        panic!("hand never ended: {streets:?}");
    }

    fn blinds_posted(data: GameData) -> Game<DealHole> {
        let game: Game<PostBlinds> = Game::new(data).into();
        game.into()
    }

    // === Blind Tests ===

    #[test]
    fn test_heads_up_button_posts_small_blind_and_acts_first() {
        let data = scripted(&[1000, 1000], &[Action::Call, Action::Call]);
        let game = blinds_posted(data);
        assert_eq!(game.data.players[0].street_bet, 10);
        assert_eq!(game.data.players[1].street_bet, 20);
        assert_eq!(game.state.round.turn_idx, 0);
        assert_eq!(game.state.round.current_bet, 20);
        assert_eq!(game.data.ledger.total(), 30);
    }

    #[test]
    fn test_blinds_sit_left_of_the_button() {
        let mut data = scripted(&[1000; 4], &vec![Action::Call; 4]);
        data.dealer_idx = 2;
        let game = blinds_posted(data);
        assert_eq!(game.data.players[3].street_bet, 10);
        assert_eq!(game.data.players[0].street_bet, 20);
        assert_eq!(game.data.players[2].street_bet, 0);
        assert_eq!(game.state.round.turn_idx, 1);
    }

    #[test]
    fn test_short_blinds_post_all_in() {
        let data = scripted(&[1000, 5, 1000], &[Action::Call, Action::Call, Action::Call]);
        let game = blinds_posted(data);
        assert_eq!(game.data.players[1].street_bet, 5);
        assert!(game.data.players[1].all_in);
        assert_eq!(game.data.players[2].street_bet, 20);
        assert_eq!(game.state.round.current_bet, 20);

        let data = scripted(&[1000, 15], &[Action::Call, Action::Call]);
        let game = blinds_posted(data);
        assert_eq!(game.data.players[1].street_bet, 15);
        assert!(game.data.players[1].all_in);
        assert_eq!(game.state.round.current_bet, 15);
        // Only the small blind can still bet, so the board will run out.
        assert!(game.data.runout);
    }

    #[test]
    fn test_hole_cards_dealt_to_every_seat() {
        let data = scripted(&[1000; 3], &[Action::Call, Action::Call, Action::Call]);
        let game: Game<BettingPreflop> = blinds_posted(data).into();
        assert!(game.data.players.iter().all(|p| p.hole_cards.len() == 2));
        assert_eq!(game.data.deck.remaining(), 52 - 6);
    }

    // === Hand Flow Tests ===

    #[test]
    fn test_everyone_folds_to_the_big_blind() {
        let data = scripted(&[1000; 3], &[Action::Fold, Action::Fold, Action::Check]);
        let (mut state, streets) = run_hand(HandState::new(data));
        assert!(!streets.contains(&Street::Showdown));
        assert!(!streets.contains(&Street::DealFlop));

        let chips: Vec<Usd> = state.data().players.iter().map(|p| p.chips).collect();
        assert_eq!(chips, [1000, 990, 1010]);
        assert!(state.data().next_hand_pending);
        assert_eq!(state.data().dealer_idx, 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::FoldOutWin {
            name: "AI2".to_string(),
            amount: 30,
        }));
    }

    #[test]
    fn test_all_in_skips_remaining_betting() {
        let data = scripted(&[1000, 1000], &[Action::Call, Action::Raise(1_000_000)]);
        let (state, streets) = run_hand(HandState::new(data));
        assert_eq!(
            streets,
            [
                Street::NewHand,
                Street::PostBlinds,
                Street::DealHole,
                Street::BettingPreflop,
                Street::DealFlop,
                Street::DealTurn,
                Street::DealRiver,
                Street::Showdown,
                Street::EndHand,
            ]
        );
        let data = state.data();
        assert!(data.runout);
        assert!(data.reveal_all);
        assert_eq!(data.board.len(), 5);
        assert_eq!(data.players.iter().map(|p| p.chips).sum::<Usd>(), 2000);
        assert!(data.ledger.is_empty());
    }

    #[test]
    fn test_checked_down_hand_reaches_showdown() {
        let data = scripted(&[1000; 3], &[Action::Call, Action::Call, Action::Check]);
        let (state, streets) = run_hand(HandState::new(data));
        for street in [
            Street::BettingFlop,
            Street::BettingTurn,
            Street::BettingRiver,
            Street::Showdown,
        ] {
            assert!(streets.contains(&street), "{streets:?}");
        }
        assert!(!state.data().runout);
        assert_eq!(
            state.data().players.iter().map(|p| p.chips).sum::<Usd>(),
            3000
        );
    }

    // === Showdown Tests ===

    #[test]
    fn test_showdown_pays_each_layer_to_its_best_hand() {
        let mut data = scripted(&[1000; 3], &[Action::Call, Action::Call, Action::Call]);
        data.board = vec![
            Card(2, Club),
            Card(7, Diamond),
            Card(9, Heart),
            Card(11, Spade),
            Card(13, Club),
        ];
        data.players[0].hole_cards = vec![Card(13, Diamond), Card(12, Diamond)];
        data.players[1].hole_cards = vec![Card(14, Spade), Card(14, Heart)];
        data.players[2].hole_cards = vec![Card(3, Heart), Card(4, Heart)];
        for (seat_idx, amount) in [(0, 200), (1, 50), (2, 200)] {
            data.players[seat_idx].chips -= amount;
            data.ledger.add_bet(seat_idx, amount);
        }
        data.players[1].all_in = true;

        let mut game: Game<EndHand> = Game {
            data,
            state: Showdown {},
        }
        .into();
        let chips: Vec<Usd> = game.data.players.iter().map(|p| p.chips).collect();
        // Aces take the 150 main pot, kings the 300 side pot.
        assert_eq!(chips, [1100, 1100, 800]);
        assert!(game.data.ledger.is_empty());

        let events = game.data.drain_events();
        let shown = events
            .iter()
            .filter(|event| matches!(event, GameEvent::Showdown { .. }))
            .count();
        assert_eq!(shown, 3);
        assert!(events.contains(&GameEvent::PotAwarded {
            name: "AI1".to_string(),
            amount: 150,
            pot_idx: 0,
        }));
        assert!(events.contains(&GameEvent::PotAwarded {
            name: "Human".to_string(),
            amount: 300,
            pot_idx: 1,
        }));
    }

    // === End of Hand Tests ===

    #[test]
    fn test_busted_seats_leave_and_button_skips_them() {
        let mut data = scripted(&[1000, 0, 0, 1000], &vec![Action::Call; 4]);
        data.dealer_idx = 1;
        data.finish_hand();

        let names: Vec<&str> = data.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Human", "AI3"]);
        assert_eq!(data.deciders.len(), 2);
        assert_eq!(data.dealer_idx, 1);
        assert!(data.next_hand_pending);
        assert_eq!(data.outcome, None);

        let events: Vec<GameEvent> = data.drain_events().into();
        assert_eq!(
            events,
            [
                GameEvent::Eliminated {
                    name: "AI1".to_string()
                },
                GameEvent::Eliminated {
                    name: "AI2".to_string()
                },
                GameEvent::ButtonMoved {
                    name: "AI3".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_button_wraps_to_the_human() {
        let mut data = scripted(&[1000, 1000, 1000], &vec![Action::Call; 3]);
        data.dealer_idx = 2;
        data.finish_hand();
        assert_eq!(data.dealer_idx, 0);
    }

    #[test]
    fn test_last_seat_standing_wins_the_session() {
        let mut data = scripted(&[2000, 0], &[Action::Call, Action::Call]);
        data.finish_hand();
        assert_eq!(data.outcome, Some(Outcome::HumanWon));
        assert!(!data.next_hand_pending);
    }

    #[test]
    fn test_human_busting_loses_the_session() {
        let mut data = scripted(&[0, 1000, 1000], &vec![Action::Call; 3]);
        data.finish_hand();
        assert_eq!(data.outcome, Some(Outcome::HumanLost));
        assert!(
            data.drain_events()
                .contains(&GameEvent::SessionOver(Outcome::HumanLost))
        );
    }
}
