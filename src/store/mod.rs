//! Game storage.
//!
//! Games live behind a [`GameStore`] keyed by [`GameId`]. Each game sits in
//! its own mutex, so operations on one game are serialized while different
//! games proceed independently. The map lock is only held long enough to
//! clone a handle out.

mod memory;
pub mod snapshot;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{GameId, GameState};

pub use memory::MemoryStore;

/// Shared, lockable handle to one game.
pub type GameHandle = Arc<Mutex<GameState>>;

/// Id-keyed game storage.
pub trait GameStore: Send + Sync {
    /// Look up a game.
    fn get(&self, id: GameId) -> Option<GameHandle>;

    /// Insert a game under its own id, replacing any game with that id.
    fn put(&self, state: GameState) -> GameHandle;

    /// Drop a game from the store. Outstanding handles stay usable.
    fn remove(&self, id: GameId) -> Option<GameHandle>;

    /// Number of stored games.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
