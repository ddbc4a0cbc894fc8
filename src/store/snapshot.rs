//! Binary snapshots of a game.
//!
//! A snapshot is the bincode encoding of a `GameState`. Decoding checks the
//! invariants a live game relies on before handing the state back, so a
//! corrupt or tampered snapshot is rejected instead of producing a game
//! with missing or duplicated cards.

use rustc_hash::FxHashMap;

use crate::cards::{build_deck, Card};
use crate::core::{GameError, GameState, PLAYER_COUNT};

/// Encode a game.
pub fn encode(state: &GameState) -> Result<Vec<u8>, GameError> {
    bincode::serialize(state).map_err(|e| GameError::Snapshot(e.to_string()))
}

/// Decode a game and check its invariants.
pub fn decode(bytes: &[u8]) -> Result<GameState, GameError> {
    let state: GameState =
        bincode::deserialize(bytes).map_err(|e| GameError::Snapshot(e.to_string()))?;
    check_invariants(&state)?;
    Ok(state)
}

fn count_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> FxHashMap<Card, usize> {
    let mut counts = FxHashMap::default();
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
    }
    counts
}

/// Check the structural invariants of a game:
/// - exactly two players, with the current seat among them
/// - deck, discard pile, hands and melds together hold the full pool,
///   each card exactly as many times as it was built
pub fn check_invariants(state: &GameState) -> Result<(), GameError> {
    if state.player_count() != PLAYER_COUNT {
        return Err(GameError::PlayerCount {
            expected: PLAYER_COUNT,
            actual: state.player_count(),
        });
    }
    if state.current_seat().index() >= state.player_count() {
        return Err(GameError::Snapshot(format!(
            "current seat {} out of range",
            state.current_seat().0
        )));
    }

    let pool = build_deck();
    if count_cards(state.all_cards()) != count_cards(&pool) {
        return Err(GameError::Snapshot(
            "cards do not match the dealt pool".to_owned(),
        ));
    }
    Ok(())
}
