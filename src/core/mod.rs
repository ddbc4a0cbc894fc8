//! Core engine types: seats and players, state, actions, RNG, configuration, errors.
//!
//! This module holds the match aggregate and the data it is built from.
//! The rules that decide whether a move is legal live in `rules`; the
//! orchestration of moves lives in `games::pinellone`.

pub mod action;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, DrawSource};
pub use config::GameConfig;
pub use error::{GameError, MoveError, ServiceError};
pub use player::{PlayerId, PlayerMap, PlayerState, Seat};
pub use rng::GameRng;
pub use state::{GameId, GameState, Phase, PLAYER_COUNT};
