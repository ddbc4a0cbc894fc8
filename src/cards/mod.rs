//! Cards and the Pinellone deck.
//!
//! ## Key Types
//!
//! - `Card`: rank + suit for plain cards, or one of the two wild kinds
//! - `CardKind`: closed normal / joker / pinella tag
//! - `Deal`: hands and remaining deck produced by dealing

pub mod card;
pub mod deck;

pub use card::{Card, CardKind, ParseCardError, Rank, Suit};
pub use deck::{build_deck, deal, shuffle, Deal, DECK_SIZE, DEFAULT_HAND_SIZE};
