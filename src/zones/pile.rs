//! Ordered card piles.
//!
//! Index 0 is the bottom, the last card is the top. The deck is a face-down
//! pile drawn from the top; the discard pile is face-up and can be taken
//! from any depth, in which case everything stacked above comes along.

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// An ordered stack of cards.
///
/// ```
/// use pinellone::cards::{Card, Rank, Suit};
/// use pinellone::zones::Pile;
///
/// let mut pile = Pile::default();
/// pile.push_top(Card::normal(Rank::Ace, Suit::Spades));
/// pile.push_top(Card::Joker);
///
/// assert_eq!(pile.top(), Some(&Card::Joker));
/// assert_eq!(pile.take_from(0).map(|c| c.len()), Some(2));
/// assert!(pile.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    /// Create a pile from cards listed bottom first.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, bottom first.
    #[must_use]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// The top card.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Place a card on top.
    pub fn push_top(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove the top card.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove `count` cards from the top, topmost first.
    ///
    /// All or nothing: returns `None` and leaves the pile untouched when
    /// fewer than `count` cards remain.
    pub fn draw_top(&mut self, count: usize) -> Option<Vec<Card>> {
        if self.cards.len() < count {
            return None;
        }
        let mut drawn = self.cards.split_off(self.cards.len() - count);
        drawn.reverse();
        Some(drawn)
    }

    /// The cards from `index` to the top, without removing them.
    #[must_use]
    pub fn peek_from(&self, index: usize) -> Option<&[Card]> {
        self.cards.get(index..).filter(|_| index < self.cards.len())
    }

    /// Remove and return the cards from `index` to the top (bottom first),
    /// truncating the pile to length `index`.
    pub fn take_from(&mut self, index: usize) -> Option<Vec<Card>> {
        (index < self.cards.len()).then(|| self.cards.split_off(index))
    }
}
