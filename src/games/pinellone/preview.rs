//! Read-only preview of a draw.
//!
//! Deck cards are face down, so a preview only says how many would come
//! off the deck. Discard-pile cards are face up and are shown as-is.

use serde::{Deserialize, Serialize};

use super::game::{Pinellone, DECK_DRAW_COUNT, DISCARD_DRAW_DECK_COUNT};
use crate::cards::Card;
use crate::core::{Action, DrawSource, GameState, MoveError};
use crate::rules::RulesEngine;

/// One card of a preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewCard {
    /// A face-down deck card.
    Hidden,
    /// A face-up discard-pile card.
    Revealed(Card),
}

/// What a draw would hand the current player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawPreview {
    pub source: DrawSource,
    /// Deck cards first, then the discard-pile suffix bottom to top.
    pub cards: Vec<PreviewCard>,
    pub total_cards: usize,
    /// Would the draw succeed right now?
    pub valid: bool,
}

impl Pinellone {
    /// Preview a draw without touching the state.
    ///
    /// Outside the draw phase (or after a close) there is nothing to preview
    /// and the rejection is returned. Otherwise the payload is always built;
    /// an illegal draw yields `valid: false` and no cards.
    pub fn preview_draw(
        &self,
        state: &GameState,
        source: DrawSource,
    ) -> Result<DrawPreview, MoveError> {
        match self.validate(state, &Action::Draw(source)) {
            Ok(()) => {}
            Err(err @ (MoveError::GameFinished | MoveError::WrongPhase { .. })) => return Err(err),
            Err(_) => {
                return Ok(DrawPreview {
                    source,
                    cards: Vec::new(),
                    total_cards: 0,
                    valid: false,
                })
            }
        }

        let cards: Vec<PreviewCard> = match source {
            DrawSource::Deck => vec![PreviewCard::Hidden; DECK_DRAW_COUNT],
            DrawSource::Discard { index } => {
                let face_up = state.discard_pile().peek_from(index).unwrap_or_default();
                std::iter::repeat(PreviewCard::Hidden)
                    .take(DISCARD_DRAW_DECK_COUNT)
                    .chain(face_up.iter().copied().map(PreviewCard::Revealed))
                    .collect()
            }
        };

        Ok(DrawPreview {
            source,
            total_cards: cards.len(),
            cards,
            valid: true,
        })
    }
}
