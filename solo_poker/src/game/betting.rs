//! Betting round bookkeeping for a single street.
//!
//! The round never owns the players. Every method that needs seat state
//! borrows the seat table from the game data, so there is exactly one
//! source of truth for stacks and flags.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entities::{Action, Player, PotLedger, SeatIndex, Usd};

/// What an action turned into once it was normalized and applied.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Applied {
    Fold,
    Check,
    /// Chips put in to match the current bet (possibly short, all-in).
    Call(Usd),
    /// Chips put in and the street bet the raise made everyone face.
    Raise { put_in: Usd, to: Usd },
}

impl fmt::Display for Applied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "folds"),
            Self::Check => write!(f, "checks"),
            Self::Call(amount) => write!(f, "calls ${amount}"),
            Self::Raise { to, .. } => write!(f, "raises to ${to}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BettingRound {
    /// Street bet every live seat has to match.
    pub current_bet: Usd,
    /// Smallest increment a raise has to add on top of `current_bet`.
    pub min_raise: Usd,
    pub turn_idx: SeatIndex,
    pub last_raiser: Option<SeatIndex>,
    /// Whether each seat acted voluntarily since the last raise.
    acted: Vec<bool>,
}

impl BettingRound {
    #[must_use]
    pub fn new(num_seats: usize, start_idx: SeatIndex, big_blind: Usd) -> Self {
        Self {
            current_bet: 0,
            min_raise: big_blind,
            turn_idx: start_idx % num_seats.max(1),
            last_raiser: None,
            acted: vec![false; num_seats],
        }
    }

    /// Move the turn to the next seat, wrapping around the table. Folded
    /// and all-in seats are not skipped here; the caller steps over them.
    pub fn next_player(&mut self) {
        self.turn_idx = (self.turn_idx + 1) % self.acted.len().max(1);
    }

    pub fn mark_acted(&mut self, seat_idx: SeatIndex) {
        self.acted[seat_idx] = true;
    }

    #[must_use]
    pub fn has_acted(&self, seat_idx: SeatIndex) -> bool {
        self.acted[seat_idx]
    }

    /// Force every live seat except `raiser` to respond to a raise.
    pub fn reset_acted_except(&mut self, players: &[Player], raiser: SeatIndex) {
        for (seat_idx, player) in players.iter().enumerate() {
            if player.is_live() {
                self.acted[seat_idx] = seat_idx == raiser;
            }
        }
        self.acted[raiser] = true;
    }

    /// The round is over once at most one seat is still in the hand, or
    /// every live seat has matched the current bet and acted since the
    /// last raise. All-in seats never block completion.
    #[must_use]
    pub fn is_complete(&self, players: &[Player]) -> bool {
        if players.iter().filter(|player| !player.folded).count() <= 1 {
            return true;
        }
        players
            .iter()
            .enumerate()
            .filter(|(_, player)| player.is_live())
            .all(|(seat_idx, player)| player.street_bet == self.current_bet && self.acted[seat_idx])
    }

    #[must_use]
    pub fn to_call(&self, player: &Player) -> Usd {
        self.current_bet.saturating_sub(player.street_bet)
    }

    /// Move up to `amount` chips from the seat's stack into the pot and
    /// return how many actually moved. Bets larger than the stack become
    /// an all-in for the whole stack.
    pub fn place_bet(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat_idx: SeatIndex,
        amount: Usd,
    ) -> Usd {
        let player = &mut players[seat_idx];
        let put_in = amount.min(player.chips);
        player.chips -= put_in;
        player.street_bet += put_in;
        if player.chips == 0 {
            player.all_in = true;
        }
        let street_bet = player.street_bet;
        ledger.add_bet(seat_idx, put_in);

        self.mark_acted(seat_idx);
        if street_bet > self.current_bet {
            self.min_raise = self.min_raise.max(street_bet - self.current_bet);
            self.current_bet = street_bet;
            self.last_raiser = Some(seat_idx);
            self.reset_acted_except(players, seat_idx);
        }
        put_in
    }

    /// Apply one action for the seat whose turn it is.
    ///
    /// A raise that doesn't exceed the call is downgraded to a call; a
    /// raise smaller than the minimum increment is lifted to it. Either
    /// may still end up all-in once clamped to the stack.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat_idx: SeatIndex,
        action: &Action,
    ) -> Applied {
        let to_call = self.to_call(&players[seat_idx]);
        match action {
            Action::Fold => {
                players[seat_idx].folded = true;
                self.mark_acted(seat_idx);
                Applied::Fold
            }
            Action::Check => {
                self.mark_acted(seat_idx);
                Applied::Check
            }
            Action::Call => self.call(players, ledger, seat_idx, to_call),
            Action::Raise(amount) if *amount <= to_call => {
                self.call(players, ledger, seat_idx, to_call)
            }
            Action::Raise(amount) => {
                let floor = to_call.saturating_add(self.min_raise);
                let before = self.current_bet;
                let put_in = self.place_bet(players, ledger, seat_idx, (*amount).max(floor));
                if self.current_bet > before {
                    Applied::Raise {
                        put_in,
                        to: self.current_bet,
                    }
                } else {
                    Applied::Call(put_in)
                }
            }
        }
    }

    fn call(
        &mut self,
        players: &mut [Player],
        ledger: &mut PotLedger,
        seat_idx: SeatIndex,
        to_call: Usd,
    ) -> Applied {
        Applied::Call(self.place_bet(players, ledger, seat_idx, to_call))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(stacks: &[Usd]) -> Vec<Player> {
        stacks
            .iter()
            .enumerate()
            .map(|(i, &chips)| Player::new(&format!("P{i}"), chips, i != 0))
            .collect()
    }

    fn total_chips(players: &[Player], ledger: &PotLedger) -> Usd {
        players.iter().map(|p| p.chips).sum::<Usd>() + ledger.total()
    }

    #[test]
    fn test_next_player_wraps() {
        let mut round = BettingRound::new(3, 2, 20);
        round.next_player();
        assert_eq!(round.turn_idx, 0);
        round.next_player();
        assert_eq!(round.turn_idx, 1);
    }

    #[test]
    fn test_fresh_round_is_incomplete_until_everyone_acts() {
        let players = table(&[1000, 1000, 1000]);
        let mut round = BettingRound::new(3, 0, 20);
        assert!(!round.is_complete(&players));
        round.mark_acted(0);
        round.mark_acted(1);
        assert!(!round.is_complete(&players));
        round.mark_acted(2);
        assert!(round.is_complete(&players));
    }

    #[test]
    fn test_raise_reopens_action() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(3, 0, 20);

        // Everyone checks at bet 0...
        for seat_idx in 0..3 {
            round.apply(&mut players, &mut ledger, seat_idx, &Action::Check);
        }
        assert!(round.is_complete(&players));

        // ...then the second player raises to 40.
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Raise(40));
        assert_eq!(applied, Applied::Raise { put_in: 40, to: 40 });
        assert_eq!(round.last_raiser, Some(1));
        assert!(!round.is_complete(&players));
        assert!(round.has_acted(1));
        assert!(!round.has_acted(0));
        assert!(!round.has_acted(2));

        round.apply(&mut players, &mut ledger, 2, &Action::Call);
        assert!(!round.is_complete(&players));
        round.apply(&mut players, &mut ledger, 0, &Action::Fold);
        assert!(round.is_complete(&players));
        assert_eq!(ledger.total(), 80);
    }

    #[test]
    fn test_fold_out_completes_immediately() {
        let mut players = table(&[1000, 1000, 1000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(3, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(100));
        round.apply(&mut players, &mut ledger, 1, &Action::Fold);
        assert!(!round.is_complete(&players));
        round.apply(&mut players, &mut ledger, 2, &Action::Fold);
        assert!(round.is_complete(&players));
    }

    #[test]
    fn test_raise_not_above_call_becomes_call() {
        let mut players = table(&[1000, 1000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(2, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(60));
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Raise(60));
        assert_eq!(applied, Applied::Call(60));
        assert_eq!(round.current_bet, 60);
        assert!(round.is_complete(&players));
    }

    #[test]
    fn test_small_raise_is_lifted_to_min_raise() {
        let mut players = table(&[1000, 1000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(2, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(100));
        assert_eq!(round.min_raise, 100);
        // Calling 100 and adding 10 is below the 100 increment floor.
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Raise(110));
        assert_eq!(applied, Applied::Raise { put_in: 200, to: 200 });
        assert_eq!(round.min_raise, 100);
    }

    #[test]
    fn test_overbet_is_clamped_to_all_in() {
        let mut players = table(&[1000, 150]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(2, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(100));
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Raise(5000));
        assert_eq!(applied, Applied::Raise { put_in: 150, to: 150 });
        assert!(players[1].all_in);
        assert_eq!(players[1].chips, 0);
        assert_eq!(total_chips(&players, &ledger), 1150);
    }

    #[test]
    fn test_raise_floor_saturates_on_huge_stacks() {
        let mut players = table(&[3_000_000_000, 1_000_000_000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(2, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(3_000_000_000));
        assert_eq!(round.min_raise, 3_000_000_000);
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Raise(Usd::MAX));
        assert_eq!(applied, Applied::Call(1_000_000_000));
        assert!(players[1].all_in);
        assert_eq!(total_chips(&players, &ledger), 4_000_000_000);
    }

    #[test]
    fn test_short_all_in_call_does_not_raise() {
        let mut players = table(&[1000, 30, 1000]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(3, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(100));
        let applied = round.apply(&mut players, &mut ledger, 1, &Action::Call);
        assert_eq!(applied, Applied::Call(30));
        assert!(players[1].all_in);
        assert_eq!(round.current_bet, 100);
        // The all-in seat never blocks completion.
        round.apply(&mut players, &mut ledger, 2, &Action::Call);
        assert!(round.is_complete(&players));
    }

    #[test]
    fn test_all_in_raise_reopens_action_for_live_seats_only() {
        let mut players = table(&[1000, 1000, 300]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(3, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Raise(100));
        round.apply(&mut players, &mut ledger, 1, &Action::Call);
        round.apply(&mut players, &mut ledger, 2, &Action::Raise(300));
        assert!(players[2].all_in);
        assert!(!round.has_acted(0));
        assert!(!round.has_acted(1));
        round.apply(&mut players, &mut ledger, 0, &Action::Call);
        round.apply(&mut players, &mut ledger, 1, &Action::Call);
        assert!(round.is_complete(&players));
        assert_eq!(ledger.total(), 900);
    }

    #[test]
    fn test_acted_implies_matched_when_complete() {
        let mut players = table(&[500, 500, 500]);
        let mut ledger = PotLedger::new();
        let mut round = BettingRound::new(3, 0, 20);
        round.apply(&mut players, &mut ledger, 0, &Action::Call);
        round.apply(&mut players, &mut ledger, 1, &Action::Raise(40));
        round.apply(&mut players, &mut ledger, 2, &Action::Raise(120));
        round.apply(&mut players, &mut ledger, 0, &Action::Call);
        round.apply(&mut players, &mut ledger, 1, &Action::Call);
        assert!(round.is_complete(&players));
        for (seat_idx, player) in players.iter().enumerate() {
            assert!(round.has_acted(seat_idx));
            assert_eq!(player.street_bet, round.current_bet);
        }
    }
}
