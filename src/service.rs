//! Id-keyed command and query surface.
//!
//! This is what a transport layer calls. Each call looks the game up, takes
//! that game's lock for the whole operation and hands back either a payload
//! or a [`ServiceError`]. Move rejections come back as
//! [`ServiceError::Rejected`]; an unknown id as [`ServiceError::NotFound`].

use tracing::debug;

use crate::core::{Action, DrawSource, GameConfig, GameId, MoveError, PlayerId, ServiceError};
use crate::games::pinellone::{DrawPreview, GameView, Pinellone, PinelloneBuilder};
use crate::rules::{GameResult, RulesEngine};
use crate::store::{snapshot, GameHandle, GameStore, MemoryStore};

/// Game service over a store.
pub struct GameService<S: GameStore = MemoryStore> {
    store: S,
    engine: Pinellone,
    config: GameConfig,
}

impl GameService<MemoryStore> {
    /// Service over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl Default for GameService<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<S: GameStore> GameService<S> {
    /// Service with the default game configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, GameConfig::default())
    }

    /// Service whose new games use `config`.
    pub fn with_config(store: S, config: GameConfig) -> Self {
        Self {
            store,
            engine: Pinellone,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    fn handle(&self, id: GameId) -> Result<GameHandle, ServiceError> {
        self.store.get(id).ok_or_else(|| {
            debug!(game_id = %id, "Game not found");
            ServiceError::NotFound(id)
        })
    }

    // === Commands ===

    /// Deal a new game for the named players and store it.
    pub fn create_game<N: AsRef<str>>(&self, names: &[N]) -> Result<GameId, ServiceError> {
        let (_, state) = PinelloneBuilder::new()
            .config(self.config.clone())
            .build(names)?;
        let id = state.id();
        self.store.put(state);
        Ok(id)
    }

    /// Apply any action for the current player.
    pub fn apply(&self, id: GameId, action: &Action) -> Result<(), ServiceError> {
        let handle = self.handle(id)?;
        let mut state = handle.lock();
        self.engine.apply_action(&mut state, action)?;
        Ok(())
    }

    pub fn draw(&self, id: GameId, source: DrawSource) -> Result<(), ServiceError> {
        self.apply(id, &Action::Draw(source))
    }

    pub fn meld(&self, id: GameId, hand_indices: &[usize]) -> Result<(), ServiceError> {
        self.apply(id, &Action::meld(hand_indices))
    }

    pub fn attach(
        &self,
        id: GameId,
        hand_index: usize,
        meld_index: usize,
    ) -> Result<(), ServiceError> {
        self.apply(
            id,
            &Action::Attach {
                hand_index,
                meld_index,
            },
        )
    }

    /// Discard and pass the turn.
    pub fn discard(&self, id: GameId, hand_index: usize) -> Result<(), ServiceError> {
        self.apply(id, &Action::Discard { hand_index })
    }

    /// Close the game and return the final scores.
    pub fn close(&self, id: GameId) -> Result<GameResult, ServiceError> {
        let handle = self.handle(id)?;
        let mut state = handle.lock();
        self.engine.apply_action(&mut state, &Action::Close)?;
        self.engine
            .is_terminal(&state)
            .ok_or(ServiceError::Rejected(MoveError::CannotClose))
    }

    /// Drop a game from the store.
    pub fn remove_game(&self, id: GameId) -> Result<(), ServiceError> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound(id))
    }

    // === Queries ===

    /// The game as seen by `viewer`; `None` gets the observer view.
    pub fn get_state(&self, id: GameId, viewer: Option<PlayerId>) -> Result<GameView, ServiceError> {
        let handle = self.handle(id)?;
        let state = handle.lock();
        Ok(GameView::project(&state, viewer))
    }

    /// What a draw from `source` would yield, without drawing.
    pub fn preview_draw(&self, id: GameId, source: DrawSource) -> Result<DrawPreview, ServiceError> {
        let handle = self.handle(id)?;
        let state = handle.lock();
        Ok(self.engine.preview_draw(&state, source)?)
    }

    // === Snapshots ===

    /// Encode a stored game.
    pub fn snapshot(&self, id: GameId) -> Result<Vec<u8>, ServiceError> {
        let handle = self.handle(id)?;
        let state = handle.lock();
        Ok(snapshot::encode(&state)?)
    }

    /// Decode a snapshot into the store, replacing any game with the same id.
    pub fn restore(&self, bytes: &[u8]) -> Result<GameId, ServiceError> {
        let state = snapshot::decode(bytes)?;
        let id = state.id();
        self.store.put(state);
        debug!(game_id = %id, "Restored game");
        Ok(id)
    }
}
