//! Plain text rendering of table snapshots and events.

use solo_poker::{Card, GameEvent, Outcome, TableView, Usd};
use std::fmt::Write;

fn cards(cards: &[Card]) -> String {
    cards.iter().map(ToString::to_string).collect()
}

/// One line per seat, board and pot underneath.
#[must_use]
pub fn table(view: &TableView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "hand #{} | {} | blinds ${}/{}",
        view.hand_no, view.street, view.small_blind, view.big_blind
    );
    for seat in &view.seats {
        let marker = if seat.is_turn { '>' } else { ' ' };
        let button = if seat.is_dealer { "(D)" } else { "   " };
        let hole = match &seat.hole_cards {
            Some(hole) if !hole.is_empty() => cards(hole),
            _ if seat.folded => "  --  ".to_string(),
            _ => "  ??  ??".to_string(),
        };
        let mut status = String::new();
        if seat.folded {
            status.push_str(" folded");
        } else if seat.all_in {
            status.push_str(" all-in");
        }
        if seat.street_bet > 0 {
            let _ = write!(status, " bet ${}", seat.street_bet);
        }
        let _ = writeln!(
            out,
            "{marker} {button} {:<6} ${:>6} {hole}{status}",
            seat.name, seat.chips
        );
    }
    let _ = writeln!(out, "board:{}", cards(&view.board));
    let _ = write!(out, "pot: ${}", view.pot);
    out
}

/// The decision prompt shown once per human turn.
#[must_use]
pub fn prompt(view: &TableView, to_call: Usd) -> String {
    let options = if to_call == 0 {
        "check | raise N | fold".to_string()
    } else {
        format!("fold | call ${to_call} | raise N")
    };
    format!("{}\nyour move: {options}", table(view))
}

/// An event as a display line, or as a JSON line.
pub fn event(event: &GameEvent, json: bool) -> String {
    if json {
        serde_json::to_string(event).unwrap_or_else(|err| format!("{{\"error\":\"{err}\"}}"))
    } else {
        event.to_string()
    }
}

#[must_use]
pub fn game_over(view: &TableView, outcome: Outcome) -> String {
    let banner = match outcome {
        Outcome::HumanWon => "YOU WIN: every computer player is out of chips",
        Outcome::HumanLost => "GAME OVER: you're out of chips",
    };
    format!("\n*** {banner} ***\n{}", table(view))
}
