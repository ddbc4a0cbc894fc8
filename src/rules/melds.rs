//! Meld legality and scoring.
//!
//! Everything here is a pure function of an ordered card slice. Order is the
//! player's chosen arrangement and matters only for where wild cards sit.
//!
//! ## Scale
//!
//! 3+ cards; the plain cards share one suit and their ranks, once sorted,
//! are consecutive with no repeats. No two wild cards may be adjacent in
//! the given order.
//!
//! ## Sestina
//!
//! 6+ plain cards forming a scale, with every wild card outside the span
//! from the first plain card to the last.

use crate::cards::{Card, Rank, Suit};

/// Shortest legal scale.
pub const MIN_SCALE_LEN: usize = 3;

/// Plain cards required for a sestina.
pub const MIN_SESTINA_LEN: usize = 6;

/// Length of a pinnacolone.
pub const PINNACOLONE_LEN: usize = 13;

fn plain_cards(cards: &[Card]) -> impl Iterator<Item = (Rank, Suit)> + '_ {
    cards.iter().filter_map(|card| match *card {
        Card::Normal { rank, suit } => Some((rank, suit)),
        Card::Pinella { .. } | Card::Joker => None,
    })
}

fn has_adjacent_wilds(cards: &[Card]) -> bool {
    cards.windows(2).any(|w| w[0].is_wild() && w[1].is_wild())
}

/// Is `cards` a valid scale?
#[must_use]
pub fn is_valid_scale(cards: &[Card]) -> bool {
    if cards.len() < MIN_SCALE_LEN {
        return false;
    }

    let plain: Vec<(Rank, Suit)> = plain_cards(cards).collect();
    let Some(&(_, suit)) = plain.first() else {
        return false;
    };
    if plain.iter().any(|&(_, s)| s != suit) {
        return false;
    }

    let mut numbers: Vec<u8> = plain.iter().map(|(rank, _)| rank.number()).collect();
    numbers.sort_unstable();
    if numbers.windows(2).any(|w| w[1] != w[0] + 1) {
        return false;
    }

    !has_adjacent_wilds(cards)
}

/// Is `cards` a valid sestina?
#[must_use]
pub fn is_valid_sestina(cards: &[Card]) -> bool {
    if cards.len() < MIN_SESTINA_LEN {
        return false;
    }

    let plain: Vec<Card> = cards.iter().copied().filter(|c| !c.is_wild()).collect();
    if plain.len() < MIN_SESTINA_LEN || !is_valid_scale(&plain) {
        return false;
    }

    let (Some(first), Some(last)) = (
        cards.iter().position(|c| !c.is_wild()),
        cards.iter().rposition(|c| !c.is_wild()),
    ) else {
        return false;
    };
    cards[first..=last].iter().all(|c| !c.is_wild())
}

/// May a player lay down `cards` as a new meld?
///
/// A player's first meld must be a sestina; after that any scale will do.
#[must_use]
pub fn can_meld(cards: &[Card], player_has_opened: bool) -> bool {
    if player_has_opened {
        is_valid_scale(cards)
    } else {
        is_valid_sestina(cards)
    }
}

/// May `card` be appended to the end of `meld`?
#[must_use]
pub fn can_attach(card: Card, meld: &[Card]) -> bool {
    if meld.is_empty() {
        return false;
    }
    let mut extended = meld.to_vec();
    extended.push(card);
    is_valid_scale(&extended)
}

/// Points a meld is worth.
///
/// The card values are summed, then one multiplier applies, checked in order:
/// sestina x2, 10+ cards without wilds x3, 7+ cards without wilds x2.
#[must_use]
pub fn meld_value(meld: &[Card]) -> i64 {
    let base: i64 = meld.iter().map(Card::value).sum();
    let clean = !meld.iter().any(Card::is_wild);

    if is_valid_sestina(meld) {
        base * 2
    } else if clean && meld.len() >= 10 {
        base * 3
    } else if clean && meld.len() >= 7 {
        base * 2
    } else {
        base
    }
}

/// Is `meld` a pinnacolone: a full ace-to-king run in one suit?
///
/// Thirteen cards: the twelve plain ranks A, 3..K exactly once each, plus one
/// pinella of the same suit standing in for the 2. Jokers are not allowed.
#[must_use]
pub fn is_pinnacolone(meld: &[Card]) -> bool {
    if meld.len() != PINNACOLONE_LEN {
        return false;
    }

    let mut pinella_suit = None;
    let mut plain = Vec::with_capacity(PINNACOLONE_LEN - 1);
    for card in meld {
        match *card {
            Card::Joker => return false,
            Card::Pinella { suit } => {
                if pinella_suit.replace(suit).is_some() {
                    return false;
                }
            }
            Card::Normal { rank, suit } => plain.push((rank, suit)),
        }
    }

    let Some(suit) = pinella_suit else {
        return false;
    };
    if plain.iter().any(|&(_, s)| s != suit) {
        return false;
    }

    let mut ranks: Vec<Rank> = plain.into_iter().map(|(rank, _)| rank).collect();
    ranks.sort_unstable();
    ranks == Rank::ALL
}
