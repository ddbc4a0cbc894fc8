//! # pinellone
//!
//! Rules engine and turn state machine for Pinellone, a two-player rummy
//! played with two merged French decks, jokers and wild black deuces
//! ("pinelle").
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: meld legality and scoring are stateless functions of a
//!    card sequence. The state machine calls them, never reimplements them.
//!
//! 2. **Rejections Are Values**: an illegal move returns a `MoveError` and
//!    leaves the state untouched. Nothing panics on player input.
//!
//! 3. **Card Conservation**: deck, discard pile, hands and melds always
//!    partition the pool dealt at creation.
//!
//! ## Modules
//!
//! - `core`: players, state, actions, RNG, configuration, errors
//! - `cards`: card values, the 104-card pool, shuffling and dealing
//! - `zones`: ordered piles (deck and discard pile)
//! - `rules`: meld predicates, scoring and the `RulesEngine` trait
//! - `games`: the Pinellone orchestrator, draw previews and player views
//! - `store`: id-keyed game storage with per-game locking and snapshots
//! - `service`: the command/query surface a transport layer calls
//!
//! ## Example
//!
//! ```
//! use pinellone::{DrawSource, GameService, Phase};
//!
//! let service = GameService::in_memory();
//! let id = service.create_game(&["Alice", "Bob"]).unwrap();
//!
//! service.draw(id, DrawSource::Deck).unwrap();
//!
//! let view = service.get_state(id, None).unwrap();
//! assert_eq!(view.phase, Phase::Play);
//! assert_eq!(view.players[0].hand.count(), 17);
//! ```

pub mod cards;
pub mod core;
pub mod games;
pub mod rules;
pub mod service;
pub mod store;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, DrawSource, GameConfig, GameError, GameId, GameRng, GameState,
    MoveError, Phase, PlayerId, PlayerMap, PlayerState, Seat, ServiceError, PLAYER_COUNT,
};

pub use crate::cards::{build_deck, deal, shuffle, Card, CardKind, Deal, Rank, Suit, DECK_SIZE};

pub use crate::zones::Pile;

pub use crate::rules::{
    can_attach, can_meld, is_pinnacolone, is_valid_scale, is_valid_sestina, meld_value,
    GameResult, RulesEngine,
};

pub use crate::games::pinellone::{
    DrawPreview, GameView, HandView, MeldView, Pinellone, PinelloneBuilder, PlayerView,
    PreviewCard,
};

pub use crate::store::{GameHandle, GameStore, MemoryStore};

pub use crate::service::GameService;
