//! Seats, player identity and per-player state.
//!
//! ## Seat
//!
//! 0-based position at the table. Turn order follows seats.
//!
//! ## PlayerMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `Seat`.
//!
//! ## PlayerState
//!
//! Hand, melds, opening flag and score for one player.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use uuid::Uuid;

use crate::cards::Card;
use crate::rules;

/// Seat index at the table (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that plays after this one.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a table of `player_count`.
    pub fn all(player_count: usize) -> impl Iterator<Item = Seat> {
        (0..player_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Opaque player identifier, handed out at game creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use pinellone::core::{PlayerMap, Seat};
///
/// let mut score: PlayerMap<i64> = PlayerMap::new(2, |_| 0);
/// score[Seat::new(1)] = 15;
/// assert_eq!(score[Seat::new(0)], 0);
/// assert_eq!(score[Seat::new(1)], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory is called once per seat, in seat order.
    pub fn new(player_count: usize, mut factory: impl FnMut(Seat) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(Seat(i))).collect();

        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over (Seat, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Seat, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Seat> for PlayerMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for PlayerMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}

/// One player's hand, melds and standing.
///
/// A card is either in the hand or in exactly one meld. Cards only ever move
/// hand -> meld, never back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    id: PlayerId,
    name: String,
    /// Kept sorted by `Card::sort_key`.
    hand: Vec<Card>,
    melds: Vec<Vec<Card>>,
    has_opened: bool,
    score: i64,
}

impl PlayerState {
    /// Create a player holding `hand`, which is sorted on the way in.
    #[must_use]
    pub fn new(name: impl Into<String>, mut hand: Vec<Card>) -> Self {
        hand.sort_by_key(Card::sort_key);
        Self {
            id: PlayerId::random(),
            name: name.into(),
            hand,
            melds: Vec::new(),
            has_opened: false,
            score: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards in hand, in sorted order.
    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Melds on the table, each in its stored order.
    #[must_use]
    pub fn melds(&self) -> &[Vec<Card>] {
        &self.melds
    }

    /// Has this player completed a first meld?
    #[must_use]
    pub fn has_opened(&self) -> bool {
        self.has_opened
    }

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Add a card to the hand, keeping it sorted.
    pub fn add_card(&mut self, card: Card) {
        self.hand.push(card);
        self.hand.sort_by_key(Card::sort_key);
    }

    /// Add several cards to the hand, keeping it sorted.
    pub fn add_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        self.hand.sort_by_key(Card::sort_key);
    }

    /// Remove the card at `index` from the hand.
    pub fn remove_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Move the cards at `indices` out of the hand into a new meld, in the
    /// order given. Indices must be distinct and in range; the caller checks.
    ///
    /// Removal runs from the highest index down so earlier indices stay valid.
    pub(crate) fn meld_from_hand(&mut self, indices: &[usize]) {
        let meld: Vec<Card> = indices.iter().map(|&i| self.hand[i]).collect();

        let mut descending = indices.to_vec();
        descending.sort_unstable_by(|a, b| b.cmp(a));
        for i in descending {
            self.hand.remove(i);
        }

        self.melds.push(meld);
        self.has_opened = true;
    }

    /// Append a hand card to one of this player's melds and re-sort the meld.
    /// Indices must be in range; the caller checks.
    pub(crate) fn attach_from_hand(&mut self, hand_index: usize, meld_index: usize) {
        let card = self.hand.remove(hand_index);
        let meld = &mut self.melds[meld_index];
        meld.push(card);
        meld.sort_by_key(Card::sort_key);
    }

    /// Apply a score change.
    pub(crate) fn adjust_score(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Total scoring value of the cards still in hand.
    #[must_use]
    pub fn hand_value(&self) -> i64 {
        self.hand.iter().map(Card::value).sum()
    }

    /// Does at least one meld qualify as a sestina?
    #[must_use]
    pub fn has_sestina(&self) -> bool {
        self.melds.iter().any(|meld| rules::is_valid_sestina(meld))
    }

    /// One card left and a sestina on the table.
    #[must_use]
    pub fn can_close(&self) -> bool {
        self.hand.len() == 1 && self.has_sestina()
    }
}
