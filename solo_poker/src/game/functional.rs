//! Pure poker functions: hand scoring, winner selection and pot awards.
//!
//! Nothing in here touches shared state, so every function is safe to call
//! from any number of threads at once.

use std::cmp::Ordering;

use super::entities::{
    ACE, Card, HandCategory, HandScore, SeatIndex, SidePot, Usd, Value,
};

/// High card of the straight formed by five values sorted highest first,
/// if they form one. The wheel (A-2-3-4-5) is a five-high straight.
fn straight_high(values: &[Value; 5]) -> Option<Value> {
    let distinct = values.windows(2).all(|pair| pair[0] != pair[1]);
    if !distinct {
        return None;
    }
    if *values == [ACE, 5, 4, 3, 2] {
        return Some(5);
    }
    (values[0] - values[4] == 4).then_some(values[0])
}

/// Score exactly five cards.
#[must_use]
pub fn eval_five(cards: &[Card; 5]) -> HandScore {
    let mut values = cards.map(|card| card.0);
    values.sort_unstable_by(|a, b| b.cmp(a));
    let is_flush = cards.iter().all(|card| card.1 == cards[0].1);
    let straight = straight_high(&values);

    // (count, value) groups, biggest group first and higher value first
    // within equally sized groups.
    let mut groups: Vec<(usize, Value)> = Vec::with_capacity(5);
    for value in values {
        match groups.iter_mut().find(|(_, v)| *v == value) {
            Some((count, _)) => *count += 1,
            None => groups.push((1, value)),
        }
    }
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let shape: Vec<usize> = groups.iter().map(|&(count, _)| count).collect();
    let grouped: Vec<Value> = groups.iter().map(|&(_, value)| value).collect();

    let (category, values) = match (straight, is_flush, shape.as_slice()) {
        (Some(high), true, _) => (HandCategory::StraightFlush, vec![high]),
        (_, _, [4, 1]) => (HandCategory::FourOfAKind, grouped),
        (_, _, [3, 2]) => (HandCategory::FullHouse, grouped),
        (_, true, _) => (HandCategory::Flush, values.to_vec()),
        (Some(high), false, _) => (HandCategory::Straight, vec![high]),
        (_, _, [3, 1, 1]) => (HandCategory::ThreeOfAKind, grouped),
        (_, _, [2, 2, 1]) => (HandCategory::TwoPair, grouped),
        (_, _, [2, 1, 1, 1]) => (HandCategory::OnePair, grouped),
        _ => (HandCategory::HighCard, values.to_vec()),
    };
    HandScore { category, values }
}

/// Visit every five-card subset of `cards`.
fn for_each_five(cards: &[Card], mut visit: impl FnMut([Card; 5])) {
    let n = cards.len();
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        visit([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                    }
                }
            }
        }
    }
}

/// Score the best five-card hand out of seven cards (21 subsets).
#[must_use]
pub fn eval_seven(cards: &[Card; 7]) -> HandScore {
    let mut best = eval_five(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);
    for_each_five(cards, |five| {
        let score = eval_five(&five);
        if score > best {
            best = score;
        }
    });
    best
}

/// Score the best five-card hand out of any number of cards. Returns `None`
/// when fewer than five cards are given (e.g. before the flop).
#[must_use]
pub fn eval_best(cards: &[Card]) -> Option<HandScore> {
    let mut best = None;
    for_each_five(cards, |five| {
        best = best.take().max(Some(eval_five(&five)));
    });
    best
}

/// Indices of every score tied for the best, in ascending order.
#[must_use]
pub fn argmax(scores: &[HandScore]) -> Vec<usize> {
    let mut winners = Vec::new();
    let mut best: Option<&HandScore> = None;
    for (idx, score) in scores.iter().enumerate() {
        match best.map(|b| score.cmp(b)) {
            None | Some(Ordering::Greater) => {
                best = Some(score);
                winners.clear();
                winners.push(idx);
            }
            Some(Ordering::Equal) => winners.push(idx),
            Some(Ordering::Less) => {}
        }
    }
    winners
}

/// Chips won by one seat from one pot layer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Award {
    pub pot_idx: usize,
    pub seat_idx: SeatIndex,
    pub amount: Usd,
}

/// Split every pot layer among its best eligible hands.
///
/// `scores` is indexed by seat; `None` marks a seat that cannot win
/// (folded or never dealt in). A layer is split evenly between the seats
/// tied for the best score among its eligible, non-folded seats. Odd chips
/// go one at a time to those winners in seat order starting at
/// `first_seat` (the first seat left of the button). A layer whose eligible
/// seats have all folded goes to the first live seat from `first_seat`.
#[must_use]
pub fn award(pots: &[SidePot], scores: &[Option<HandScore>], first_seat: SeatIndex) -> Vec<Award> {
    let num_seats = scores.len();
    let distance = |seat_idx: SeatIndex| (seat_idx + num_seats - first_seat % num_seats) % num_seats;

    let mut awards = Vec::new();
    for (pot_idx, pot) in pots.iter().enumerate() {
        let contenders: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&seat_idx| scores.get(seat_idx).is_some_and(Option::is_some))
            .collect();

        let mut winners: Vec<SeatIndex> = if contenders.is_empty() {
            (0..num_seats)
                .filter(|&seat_idx| scores[seat_idx].is_some())
                .min_by_key(|&seat_idx| distance(seat_idx))
                .into_iter()
                .collect()
        } else {
            let contender_scores: Vec<HandScore> = contenders
                .iter()
                .filter_map(|&seat_idx| scores[seat_idx].clone())
                .collect();
            argmax(&contender_scores)
                .into_iter()
                .map(|idx| contenders[idx])
                .collect()
        };
        if winners.is_empty() {
            continue;
        }
        winners.sort_by_key(|&seat_idx| distance(seat_idx));

        let num_winners = winners.len() as Usd;
        let share = pot.amount / num_winners;
        let mut odd_chips = pot.amount % num_winners;
        for seat_idx in winners {
            let mut amount = share;
            if odd_chips > 0 {
                amount += 1;
                odd_chips -= 1;
            }
            awards.push(Award {
                pot_idx,
                seat_idx,
                amount,
            });
        }
    }
    awards
}
