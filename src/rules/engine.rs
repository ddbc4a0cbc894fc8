//! Rules engine trait for game implementations.
//!
//! A game implements `RulesEngine` to say:
//! - whether an action is legal right now
//! - how a legal action changes the state
//! - when the match is over

use serde::{Deserialize, Serialize};

use crate::core::action::Action;
use crate::core::error::MoveError;
use crate::core::player::{PlayerMap, Seat};
use crate::core::state::GameState;

/// Outcome of a closed match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Seat that closed.
    pub closer: Seat,

    /// Final score per seat.
    pub scores: PlayerMap<i64>,
}

impl GameResult {
    /// Did `seat` close the match?
    #[must_use]
    pub fn is_winner(&self, seat: Seat) -> bool {
        self.closer == seat
    }

    #[must_use]
    pub fn score(&self, seat: Seat) -> i64 {
        self.scores[seat]
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `validate` must not mutate; it is what previews and legality checks use
/// - `apply_action` validates first and leaves the state untouched on `Err`
/// - `is_terminal` returns `None` while the match continues
pub trait RulesEngine {
    /// Check an action for the current player without applying it.
    fn validate(&self, state: &GameState, action: &Action) -> Result<(), MoveError>;

    /// Apply an action for the current player.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), MoveError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Is `action` legal for the current player?
    fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.validate(state, action).is_ok()
    }

    /// Filter `candidates` down to the legal ones.
    fn legal_actions<'a, I>(&self, state: &GameState, candidates: I) -> Vec<Action>
    where
        I: IntoIterator<Item = &'a Action>,
        Self: Sized,
    {
        candidates
            .into_iter()
            .filter(|action| self.is_legal(state, action))
            .cloned()
            .collect()
    }
}
