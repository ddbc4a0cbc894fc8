//! Card values: rank, suit, and the closed normal / joker / pinella tag.
//!
//! Cards carry no identity. Two cards with equal fields are interchangeable,
//! which is what the double deck needs: every normal card exists twice.
//!
//! ## Wild cards
//!
//! Jokers and pinelle (black deuces) are wild. They are excluded from suit
//! and sequence checks and always sort to the end of a hand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    #[serde(rename = "♠")]
    Spades,
    #[serde(rename = "♥")]
    Hearts,
    #[serde(rename = "♦")]
    Diamonds,
    #[serde(rename = "♣")]
    Clubs,
}

impl Suit {
    /// All suits in hand-sorting order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Black suits, the only ones a pinella can carry.
    pub const BLACK: [Suit; 2] = [Suit::Spades, Suit::Clubs];

    /// Unicode glyph for this suit.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    /// Is this a black suit?
    #[must_use]
    pub const fn is_black(self) -> bool {
        matches!(self, Suit::Spades | Suit::Clubs)
    }

    /// Position of this suit when sorting a hand (1-based).
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Suit::Spades => 1,
            Suit::Hearts => 2,
            Suit::Diamonds => 3,
            Suit::Clubs => 4,
        }
    }

    fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "♠" | "S" | "s" => Some(Suit::Spades),
            "♥" | "H" | "h" => Some(Suit::Hearts),
            "♦" | "D" | "d" => Some(Suit::Diamonds),
            "♣" | "C" | "c" => Some(Suit::Clubs),
            _ => None,
        }
    }
}

/// Plain ranks.
///
/// There is no plain "2": the only deuces in play are the wild pinelle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "A")]
    Ace,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
}

impl Rank {
    /// All plain ranks, ace low.
    pub const ALL: [Rank; 12] = [
        Rank::Ace,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Numeric position used for sequences: A=1, 3..10 as printed, J=11, Q=12, K=13.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
        }
    }

    /// Printed symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Scoring points for a plain card of this rank.
    #[must_use]
    pub const fn points(self) -> i64 {
        match self {
            Rank::Ace => 15,
            Rank::Three | Rank::Four | Rank::Five => 5,
            Rank::Six
            | Rank::Seven
            | Rank::Eight
            | Rank::Nine
            | Rank::Ten
            | Rank::Jack
            | Rank::Queen
            | Rank::King => 10,
        }
    }

    fn from_symbol(s: &str) -> Option<Self> {
        Rank::ALL.into_iter().find(|r| r.symbol() == s)
    }
}

/// Closed tag distinguishing the three kinds of card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Normal,
    Joker,
    Pinella,
}

/// A single playing card.
///
/// A pinella is always a black deuce, so it only records its suit; a joker
/// has neither rank nor suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    Normal { rank: Rank, suit: Suit },
    Pinella { suit: Suit },
    Joker,
}

/// Sort key placed on every wild card so they collect at the end of a hand.
const WILD_SORT_KEY: (u8, u8) = (99, 99);

impl Card {
    /// A plain card.
    #[must_use]
    pub const fn normal(rank: Rank, suit: Suit) -> Self {
        Card::Normal { rank, suit }
    }

    /// The card's kind tag.
    #[must_use]
    pub const fn kind(&self) -> CardKind {
        match self {
            Card::Normal { .. } => CardKind::Normal,
            Card::Pinella { .. } => CardKind::Pinella,
            Card::Joker => CardKind::Joker,
        }
    }

    /// Jokers and pinelle are wild.
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self, Card::Joker | Card::Pinella { .. })
    }

    /// Plain rank, `None` for wild cards.
    #[must_use]
    pub const fn rank(&self) -> Option<Rank> {
        match self {
            Card::Normal { rank, .. } => Some(*rank),
            Card::Pinella { .. } | Card::Joker => None,
        }
    }

    /// Suit, `None` for jokers.
    #[must_use]
    pub const fn suit(&self) -> Option<Suit> {
        match self {
            Card::Normal { suit, .. } | Card::Pinella { suit } => Some(*suit),
            Card::Joker => None,
        }
    }

    /// Scoring value: joker 25, pinella 20, ace 15, 6 to king 10, 3 to 5 worth 5.
    #[must_use]
    pub const fn value(&self) -> i64 {
        match self {
            Card::Joker => 25,
            Card::Pinella { .. } => 20,
            Card::Normal { rank, .. } => rank.points(),
        }
    }

    /// Hand ordering key: suit then rank, wild cards last.
    #[must_use]
    pub const fn sort_key(&self) -> (u8, u8) {
        match self {
            Card::Normal { rank, suit } => (suit.order(), rank.number()),
            Card::Pinella { .. } | Card::Joker => WILD_SORT_KEY,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Normal { rank, suit } => write!(f, "{}{}", rank.symbol(), suit.glyph()),
            Card::Pinella { suit } => write!(f, "2{}", suit.glyph()),
            Card::Joker => write!(f, "Joker"),
        }
    }
}

/// Failure to parse a card from its display form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    #[error("empty card string")]
    Empty,
    #[error("unknown suit in {0:?}")]
    Suit(String),
    #[error("unknown rank in {0:?}")]
    Rank(String),
    #[error("a pinella must be a black deuce, got {0:?}")]
    RedDeuce(String),
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the display form (`"10♥"`, `"2♣"`, `"Joker"`).
    /// ASCII suit letters (`S H D C`) are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseCardError::Empty);
        }
        if s.eq_ignore_ascii_case("joker") {
            return Ok(Card::Joker);
        }

        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .ok_or(ParseCardError::Empty)?;
        let (rank_part, suit_part) = s.split_at(split);
        let suit =
            Suit::from_symbol(suit_part).ok_or_else(|| ParseCardError::Suit(s.to_string()))?;

        if rank_part == "2" {
            return if suit.is_black() {
                Ok(Card::Pinella { suit })
            } else {
                Err(ParseCardError::RedDeuce(s.to_string()))
            };
        }

        let rank =
            Rank::from_symbol(rank_part).ok_or_else(|| ParseCardError::Rank(s.to_string()))?;
        Ok(Card::Normal { rank, suit })
    }
}
