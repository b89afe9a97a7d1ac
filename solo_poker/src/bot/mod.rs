//! Computer players.
//!
//! The table only knows computer seats through the [`Decide`] trait: given
//! the seat, what it has to call and the big blind, return an action.
//! [`Bot`] implements it with three presets that only look at the hole
//! cards:
//!
//! ### Easy
//! - Checks when free, calls up to one big blind, folds otherwise
//!
//! ### Normal
//! - Raises pairs and two broadway cards, limps with a jack or better
//! - Bluff-raises 10% of the time when checking is free
//!
//! ### Hard
//! - Scores pairs, high cards, suitedness and connectors
//! - Raises premiums, mixes raises and checks with medium hands
//! - Bluff-raises 15% of the time, folds weak hands to big bets
//!
//! ## Example
//!
//! ```
//! use solo_poker::bot::{Bot, Decide};
//! use solo_poker::entities::{Action, Card, Player, Suit};
//! use solo_poker::Difficulty;
//!
//! let mut bot = Bot::seeded(Difficulty::Easy, 1);
//! let mut player = Player::new("AI1", 1000, true);
//! player.hole_cards = vec![Card(2, Suit::Club), Card(7, Suit::Heart)];
//! assert_eq!(bot.decide(&player, 200, 20), Action::Fold);
//! ```

pub mod decision;
pub mod models;

pub use decision::{Bot, Decide};
pub use models::DifficultyParams;
