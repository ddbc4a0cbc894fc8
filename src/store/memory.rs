//! In-memory store. Nothing survives a restart.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::debug;

use super::{GameHandle, GameStore};
use crate::core::{GameId, GameState};

/// Games held in a map behind a read-write lock.
#[derive(Default)]
pub struct MemoryStore {
    games: RwLock<FxHashMap<GameId, GameHandle>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every stored game, in no particular order.
    pub fn ids(&self) -> Vec<GameId> {
        self.games.read().keys().copied().collect()
    }
}

impl GameStore for MemoryStore {
    fn get(&self, id: GameId) -> Option<GameHandle> {
        self.games.read().get(&id).cloned()
    }

    fn put(&self, state: GameState) -> GameHandle {
        let id = state.id();
        let handle = Arc::new(Mutex::new(state));
        self.games.write().insert(id, Arc::clone(&handle));
        debug!(game_id = %id, "Stored game");
        handle
    }

    fn remove(&self, id: GameId) -> Option<GameHandle> {
        let removed = self.games.write().remove(&id);
        if removed.is_some() {
            debug!(game_id = %id, "Removed game");
        }
        removed
    }

    fn len(&self) -> usize {
        self.games.read().len()
    }
}
