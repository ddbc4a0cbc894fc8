//! The match aggregate and its turn state machine.
//!
//! ## Phases
//!
//! ```text
//! Draw --draw--> Play --discard--> Draw (next seat)
//! ```
//!
//! Melding and attaching happen in `Play` and leave the phase alone.
//! `Phase::Discard` is reserved: no transition enters it.
//!
//! ## Card conservation
//!
//! deck + discard pile + every hand + every meld always holds exactly the
//! pool dealt at creation. Cards move between these places, never appear
//! or vanish.

use im::Vector;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::action::{Action, ActionRecord};
use super::config::GameConfig;
use super::player::{PlayerId, PlayerMap, PlayerState, Seat};
use crate::cards::Card;
use crate::rules::GameResult;
use crate::zones::Pile;

/// Pinellone is played by exactly two players.
pub const PLAYER_COUNT: usize = 2;

/// Game identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub Uuid);

impl GameId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// The current player must draw.
    Draw,
    /// The current player may meld, attach, then discard.
    Play,
    /// Reserved; never entered.
    Discard,
}

/// Complete state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    id: GameId,
    config: GameConfig,

    /// Players in seat order.
    players: PlayerMap<PlayerState>,

    /// Face-down draw pile.
    deck: Pile,

    /// Face-up discard pile.
    discard_pile: Pile,

    current_seat: Seat,
    phase: Phase,

    /// Turn number (starts at 1).
    turn_number: u32,

    /// Action sequence within the current turn.
    action_sequence: u32,

    /// Successful actions, oldest first.
    history: Vector<ActionRecord>,

    /// Set once a player closes.
    result: Option<GameResult>,

    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl GameState {
    /// Assemble a freshly dealt game. Seat 0 starts, in the draw phase.
    #[must_use]
    pub fn new(players: PlayerMap<PlayerState>, deck: Vec<Card>, config: GameConfig) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: GameId::random(),
            config,
            players,
            deck: Pile::new(deck),
            discard_pile: Pile::default(),
            current_seat: Seat::new(0),
            phase: Phase::Draw,
            turn_number: 1,
            action_sequence: 0,
            history: Vector::new(),
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    // === Players ===

    #[must_use]
    pub fn players(&self) -> &PlayerMap<PlayerState> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, seat: Seat) -> &PlayerState {
        &self.players[seat]
    }

    pub(crate) fn player_mut(&mut self, seat: Seat) -> &mut PlayerState {
        &mut self.players[seat]
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_seat(&self) -> Seat {
        self.current_seat
    }

    #[must_use]
    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current_seat]
    }

    pub(crate) fn current_player_mut(&mut self) -> &mut PlayerState {
        &mut self.players[self.current_seat]
    }

    /// Find a player's seat by id.
    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<Seat> {
        self.players
            .iter()
            .find(|(_, p)| p.id() == id)
            .map(|(seat, _)| seat)
    }

    // === Piles ===

    #[must_use]
    pub fn deck(&self) -> &Pile {
        &self.deck
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    pub(crate) fn deck_mut(&mut self) -> &mut Pile {
        &mut self.deck
    }

    pub(crate) fn discard_pile_mut(&mut self) -> &mut Pile {
        &mut self.discard_pile
    }

    // === Phase and turns ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.touch();
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Hand the turn to the next seat and reset to the draw phase.
    ///
    /// This is the only place `current_seat` changes.
    pub(crate) fn advance_turn(&mut self) {
        self.current_seat = self.current_seat.next(self.player_count());
        self.phase = Phase::Draw;
        self.turn_number += 1;
        self.action_sequence = 0;
        self.touch();
    }

    // === History ===

    /// Successful actions, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Append an action to the history, stamping turn and sequence.
    pub(crate) fn record_action(&mut self, seat: Seat, action: Action) {
        let sequence = self.action_sequence;
        self.action_sequence += 1;
        self.history
            .push_back(ActionRecord::new(seat, action, self.turn_number, sequence));
    }

    // === Ending ===

    /// True while any player satisfies the closing condition.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.players.values().any(PlayerState::can_close)
    }

    /// Outcome, once a player has closed.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Has a player closed?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Scores each player would finish with if `closer` closed now:
    /// the closer gains the bonus, everyone else loses their hand value.
    #[must_use]
    pub fn final_scores(&self, closer: Seat) -> PlayerMap<i64> {
        let bonus = self.config.close_bonus;
        PlayerMap::new(self.player_count(), |seat| {
            let player = &self.players[seat];
            if seat == closer {
                player.score() + bonus
            } else {
                player.score() - player.hand_value()
            }
        })
    }

    pub(crate) fn set_result(&mut self, result: GameResult) {
        self.result = Some(result);
        self.touch();
    }

    // === Bookkeeping ===

    #[must_use]
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Every card in the game: deck, discard pile, hands and melds.
    pub fn all_cards(&self) -> impl Iterator<Item = &Card> {
        self.deck
            .as_slice()
            .iter()
            .chain(self.discard_pile.as_slice())
            .chain(self.players.values().flat_map(|p| {
                p.hand().iter().chain(p.melds().iter().flatten())
            }))
    }
}
