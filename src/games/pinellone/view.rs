//! Player-scoped projections of a game.
//!
//! Hands are private; everything else is public. A viewer whose id matches
//! a seat sees that seat's cards, everyone else sees only a count.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::cards::Card;
use crate::core::{GameId, GameState, Phase, PlayerId, PlayerState, Seat};
use crate::rules::{is_pinnacolone, is_valid_sestina, meld_value, GameResult};

/// A hand as one viewer is allowed to see it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandView {
    Revealed(Vec<Card>),
    Hidden { count: usize },
}

impl HandView {
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            HandView::Revealed(cards) => cards.len(),
            HandView::Hidden { count } => *count,
        }
    }

    #[must_use]
    pub fn cards(&self) -> Option<&[Card]> {
        match self {
            HandView::Revealed(cards) => Some(cards),
            HandView::Hidden { .. } => None,
        }
    }
}

/// A meld on the table with its derived scoring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeldView {
    pub cards: Vec<Card>,
    pub value: i64,
    pub is_sestina: bool,
    pub is_pinnacolone: bool,
}

impl MeldView {
    #[must_use]
    pub fn new(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
            value: meld_value(cards),
            is_sestina: is_valid_sestina(cards),
            is_pinnacolone: is_pinnacolone(cards),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub seat: Seat,
    pub hand: HandView,
    pub melds: Vec<MeldView>,
    pub has_opened: bool,
    pub score: i64,
    pub can_close: bool,
}

impl PlayerView {
    /// Project one player; `reveal` decides whether the hand is shown.
    #[must_use]
    pub fn new(seat: Seat, player: &PlayerState, reveal: bool) -> Self {
        let hand = if reveal {
            HandView::Revealed(player.hand().to_vec())
        } else {
            HandView::Hidden {
                count: player.hand().len(),
            }
        };

        Self {
            id: player.id(),
            name: player.name().to_owned(),
            seat,
            hand,
            melds: player.melds().iter().map(|m| MeldView::new(m)).collect(),
            has_opened: player.has_opened(),
            score: player.score(),
            can_close: player.can_close(),
        }
    }
}

/// The game as seen by one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub id: GameId,
    /// Players in seat order.
    pub players: Vec<PlayerView>,
    pub current_seat: Seat,
    pub phase: Phase,
    pub deck_count: usize,
    /// Bottom first.
    pub discard_pile: Vec<Card>,
    /// True while any player could close.
    pub is_game_over: bool,
    pub result: Option<GameResult>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl GameView {
    /// Project `state` for `viewer`. `None`, or an id not seated at this
    /// table, gets the observer view.
    #[must_use]
    pub fn project(state: &GameState, viewer: Option<PlayerId>) -> Self {
        let players = state
            .players()
            .iter()
            .map(|(seat, player)| PlayerView::new(seat, player, viewer == Some(player.id())))
            .collect();

        Self {
            id: state.id(),
            players,
            current_seat: state.current_seat(),
            phase: state.phase(),
            deck_count: state.deck().len(),
            discard_pile: state.discard_pile().as_slice().to_vec(),
            is_game_over: state.is_game_over(),
            result: state.result().cloned(),
            created_at: state.created_at(),
            updated_at: state.updated_at(),
        }
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> Option<&PlayerView> {
        self.players.get(seat.index())
    }
}
