//! Error types.
//!
//! Two classes are kept apart:
//! - [`GameError`]: a game could not be built (or restored). Exceptional.
//! - [`MoveError`]: a move was rejected. This is an ordinary outcome of
//!   play; the caller maps it to a user-facing message and may retry.
//!
//! [`ServiceError`] sits at the store boundary and adds "game not found".

use thiserror::Error;

use super::state::{GameId, Phase};

/// Failure to construct or restore a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("exactly {expected} players required, got {actual}")]
    PlayerCount { expected: usize, actual: usize },

    #[error("not enough cards to deal: need {needed}, have {available}")]
    InsufficientCards { needed: usize, available: usize },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),
}

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("wrong phase: expected {expected:?}, game is in {actual:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("the game is already closed")]
    GameFinished,

    #[error("hand index out of range")]
    HandIndexOutOfRange,

    #[error("hand index used more than once")]
    DuplicateHandIndex,

    #[error("meld index out of range")]
    MeldIndexOutOfRange,

    #[error("discard pile index out of range")]
    DiscardIndexOutOfRange,

    #[error("discard pile is empty")]
    EmptyDiscardPile,

    #[error("deck has {available} cards, {needed} needed")]
    DeckExhausted { needed: usize, available: usize },

    #[error("cards do not form a legal meld")]
    InvalidMeld,

    #[error("card cannot be attached to that meld")]
    InvalidAttachment,

    #[error("player must open before discarding")]
    NotOpened,

    #[error("closing requires one card in hand and a sestina on the table")]
    CannotClose,
}

/// Error surfaced by the id-keyed service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("game {0} not found")]
    NotFound(GameId),

    #[error(transparent)]
    Rejected(#[from] MoveError),

    #[error(transparent)]
    Game(#[from] GameError),
}
