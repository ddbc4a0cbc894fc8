//! Deck construction, shuffling and dealing.
//!
//! The Pinellone pool is two merged French decks. Each half contributes:
//! - one pinella per black suit (the black deuces, wild)
//! - one plain card for every suit and rank, deuces excluded (48)
//! - two jokers
//!
//! giving 52 cards per half and [`DECK_SIZE`] in total.

use super::card::{Card, Rank, Suit};
use crate::core::error::GameError;
use crate::core::rng::GameRng;

/// Number of French decks merged into the pool.
pub const DECK_COUNT: usize = 2;

/// Jokers contributed by each half-deck.
pub const JOKERS_PER_DECK: usize = 2;

/// Total cards in a freshly built pool.
pub const DECK_SIZE: usize =
    DECK_COUNT * (Suit::BLACK.len() + Suit::ALL.len() * Rank::ALL.len() + JOKERS_PER_DECK);

/// Cards dealt to each player at the start of a game.
pub const DEFAULT_HAND_SIZE: usize = 15;

/// Result of dealing: the undealt draw pile plus one hand per seat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deal {
    /// Cards left after dealing, in shuffled order (top = end).
    pub remaining: Vec<Card>,
    /// Hands in seat order.
    pub hands: Vec<Vec<Card>>,
}

/// Build the unshuffled pool.
#[must_use]
pub fn build_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);

    for _ in 0..DECK_COUNT {
        for suit in Suit::BLACK {
            cards.push(Card::Pinella { suit });
        }

        for suit in [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs] {
            for rank in Rank::ALL {
                cards.push(Card::normal(rank, suit));
            }
        }

        for _ in 0..JOKERS_PER_DECK {
            cards.push(Card::Joker);
        }
    }

    cards
}

/// Uniformly permute the cards.
#[must_use]
pub fn shuffle(mut cards: Vec<Card>, rng: &mut GameRng) -> Vec<Card> {
    rng.shuffle(&mut cards);
    cards
}

/// Deal `hand_size` cards per player from the front of `deck`, in seat order.
///
/// Fails with [`GameError::InsufficientCards`] when the deck cannot cover
/// every hand.
pub fn deal(deck: Vec<Card>, player_count: usize, hand_size: usize) -> Result<Deal, GameError> {
    let needed = player_count
        .checked_mul(hand_size)
        .unwrap_or(usize::MAX);
    if deck.len() < needed {
        return Err(GameError::InsufficientCards {
            needed,
            available: deck.len(),
        });
    }

    let mut remaining = deck;
    let mut hands = Vec::with_capacity(player_count);
    for _ in 0..player_count {
        let rest = remaining.split_off(hand_size);
        hands.push(std::mem::replace(&mut remaining, rest));
    }

    Ok(Deal { remaining, hands })
}
