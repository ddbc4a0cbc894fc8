//! Player intents and the move history.
//!
//! An `Action` is one of the five things a player can ask for on their turn.
//! Successful actions are appended to the game's history as `ActionRecord`s.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Seat;

/// Where a draw takes its cards from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawSource {
    /// Two face-down cards from the top of the deck.
    Deck,
    /// One card from the deck plus the discard pile from `index` to the top.
    Discard { index: usize },
}

/// A player intent.
///
/// ## Example
///
/// ```
/// use pinellone::core::{Action, DrawSource};
///
/// let draw = Action::Draw(DrawSource::Deck);
/// let meld = Action::meld(&[0, 1, 2]);
///
/// assert_eq!(draw.name(), "draw");
/// assert_eq!(meld.name(), "meld");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Draw(DrawSource),
    /// Hand indices in the order the meld should be laid out.
    /// SmallVec keeps typical melds off the heap.
    Meld { indices: SmallVec<[usize; 8]> },
    Attach { hand_index: usize, meld_index: usize },
    Discard { hand_index: usize },
    Close,
}

impl Action {
    /// Build a meld action from hand indices.
    #[must_use]
    pub fn meld(indices: &[usize]) -> Self {
        Action::Meld {
            indices: SmallVec::from_slice(indices),
        }
    }

    /// Short verb, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Draw(_) => "draw",
            Action::Meld { .. } => "meld",
            Action::Attach { .. } => "attach",
            Action::Discard { .. } => "discard",
            Action::Close => "close",
        }
    }
}

/// A successful action with the metadata needed to replay it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Seat that acted.
    pub seat: Seat,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(seat: Seat, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            seat,
            action,
            turn,
            sequence,
        }
    }
}
