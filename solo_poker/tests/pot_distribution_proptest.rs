//! Side pot construction and award properties.
//!
//! Every chip put into a hand has to come back out through exactly one
//! pot layer and exactly one award.

use proptest::prelude::*;
use solo_poker::{
    PotLedger, Usd,
    entities::{Card, HandScore, Suit},
    functional::{award, eval_five},
};

// Contributions for up to five seats; zero means the seat put nothing in.
fn contributions_strategy() -> impl Strategy<Value = Vec<Usd>> {
    prop::collection::vec(0..=500 as Usd, 2..=5)
}

fn ledger_from(contributions: &[Usd]) -> PotLedger {
    let mut ledger = PotLedger::new();
    for (seat_idx, &amount) in contributions.iter().enumerate() {
        // Bets arrive street by street; split them to exercise accumulation.
        let first = amount / 2;
        ledger.add_bet(seat_idx, first);
        ledger.add_bet(seat_idx, amount - first);
    }
    ledger
}

fn high_card(top: u8) -> HandScore {
    eval_five(&[
        Card(top, Suit::Club),
        Card(2, Suit::Heart),
        Card(3, Suit::Spade),
        Card(4, Suit::Diamond),
        Card(6, Suit::Heart),
    ])
}

proptest! {
    #[test]
    fn test_pots_add_up_to_ledger(contributions in contributions_strategy()) {
        let ledger = ledger_from(&contributions);
        let pots = ledger.build_pots();
        prop_assert_eq!(pots.iter().map(|pot| pot.amount).sum::<Usd>(), ledger.total());
        prop_assert!(pots.iter().all(|pot| pot.amount > 0));
    }

    #[test]
    fn test_pot_layers_only_shrink(contributions in contributions_strategy()) {
        let pots = ledger_from(&contributions).build_pots();
        for pair in pots.windows(2) {
            prop_assert!(pair[1].eligible.is_subset(&pair[0].eligible));
            prop_assert!(pair[1].eligible.len() < pair[0].eligible.len());
        }
        if let Some(main) = pots.first() {
            let contributors = contributions.iter().filter(|&&amount| amount > 0).count();
            prop_assert_eq!(main.eligible.len(), contributors);
        }
    }

    #[test]
    fn test_awards_hand_out_every_chip(
        contributions in contributions_strategy(),
        tops in prop::collection::vec(prop::option::weighted(0.7, 7u8..=14), 5),
        first_seat in 0usize..5,
    ) {
        let ledger = ledger_from(&contributions);
        let pots = ledger.build_pots();
        let mut scores: Vec<Option<HandScore>> = contributions
            .iter()
            .zip(&tops)
            .map(|(_, top)| top.map(high_card))
            .collect();
        // Somebody always survives to collect the pot.
        if scores.iter().all(Option::is_none) {
            scores[0] = Some(high_card(7));
        }

        let awards = award(&pots, &scores, first_seat % scores.len());
        prop_assert_eq!(awards.iter().map(|a| a.amount).sum::<Usd>(), ledger.total());
        for a in &awards {
            prop_assert!(scores[a.seat_idx].is_some(), "folded seat {} won", a.seat_idx);
        }
    }

    #[test]
    fn test_split_pots_differ_by_at_most_one_chip(amount in 1..=1000 as Usd, winners in 2usize..=4) {
        let mut ledger = PotLedger::new();
        ledger.add_bet(0, amount);
        let pots = ledger.build_pots();
        let mut pot = pots[0].clone();
        pot.eligible = (0..winners).collect();
        let scores = vec![Some(high_card(9)); winners];

        let awards = award(&[pot], &scores, 1);
        let min = awards.iter().map(|a| a.amount).min().unwrap();
        let max = awards.iter().map(|a| a.amount).max().unwrap();
        prop_assert!(max - min <= 1);
        // Odd chips start left of the button.
        if amount % winners as Usd != 0 {
            prop_assert_eq!(awards[0].seat_idx, 1);
            prop_assert_eq!(awards[0].amount, max);
        }
    }
}

#[test]
fn test_three_way_all_in_layers() {
    let ledger = ledger_from(&[50, 100, 100]);
    let pots = ledger.build_pots();
    assert_eq!(pots.len(), 2);
    assert_eq!(pots[0].amount, 150);
    assert_eq!(pots[1].amount, 100);
    assert_eq!(pots[1].eligible.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
}
