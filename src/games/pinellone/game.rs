//! Pinellone game implementation.

use tracing::{debug, info};

use crate::cards::{build_deck, deal, shuffle, Deal};
use crate::core::{
    Action, DrawSource, GameConfig, GameError, GameRng, GameState, MoveError, Phase, PlayerMap,
    PlayerState, PLAYER_COUNT,
};
use crate::rules::{can_attach, can_meld, GameResult, RulesEngine};

/// Cards taken from the deck by a plain deck draw.
pub const DECK_DRAW_COUNT: usize = 2;

/// Cards taken from the deck alongside a discard-pile pickup.
pub const DISCARD_DRAW_DECK_COUNT: usize = 1;

/// The Pinellone rules. Stateless: everything lives in `GameState`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pinellone;

/// Builder for a freshly dealt Pinellone match.
#[derive(Clone, Debug, Default)]
pub struct PinelloneBuilder {
    config: GameConfig,
}

impl PinelloneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.config.hand_size = size;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn close_bonus(mut self, bonus: i64) -> Self {
        self.config.close_bonus = bonus;
        self
    }

    /// Shuffle, deal and seat the named players.
    ///
    /// Fails if the table is not exactly two players or the pool cannot
    /// cover the deal.
    pub fn build<S: AsRef<str>>(self, names: &[S]) -> Result<(Pinellone, GameState), GameError> {
        if names.len() != PLAYER_COUNT {
            return Err(GameError::PlayerCount {
                expected: PLAYER_COUNT,
                actual: names.len(),
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        let cards = shuffle(build_deck(), &mut rng);
        let Deal { remaining, hands } = deal(cards, PLAYER_COUNT, self.config.hand_size)?;

        let mut hands = hands.into_iter();
        let players = PlayerMap::new(PLAYER_COUNT, |seat| {
            PlayerState::new(names[seat.index()].as_ref(), hands.next().unwrap_or_default())
        });

        let state = GameState::new(players, remaining, self.config);
        info!(
            game_id = %state.id(),
            hand_size = state.config().hand_size,
            deck = state.deck().len(),
            "Game created"
        );

        Ok((Pinellone, state))
    }
}

fn require_phase(state: &GameState, expected: Phase) -> Result<(), MoveError> {
    if state.phase() == expected {
        Ok(())
    } else {
        Err(MoveError::WrongPhase {
            expected,
            actual: state.phase(),
        })
    }
}

fn require_deck(state: &GameState, needed: usize) -> Result<(), MoveError> {
    let available = state.deck().len();
    if available < needed {
        return Err(MoveError::DeckExhausted { needed, available });
    }
    Ok(())
}

impl Pinellone {
    fn validate_draw(&self, state: &GameState, source: DrawSource) -> Result<(), MoveError> {
        require_phase(state, Phase::Draw)?;

        match source {
            DrawSource::Deck => require_deck(state, DECK_DRAW_COUNT),
            DrawSource::Discard { index } => {
                let pile = state.discard_pile();
                if pile.is_empty() {
                    return Err(MoveError::EmptyDiscardPile);
                }
                if index >= pile.len() {
                    return Err(MoveError::DiscardIndexOutOfRange);
                }
                require_deck(state, DISCARD_DRAW_DECK_COUNT)
            }
        }
    }

    fn validate_meld(&self, state: &GameState, indices: &[usize]) -> Result<(), MoveError> {
        require_phase(state, Phase::Play)?;

        let player = state.current_player();
        let hand = player.hand();
        if indices.iter().any(|&i| i >= hand.len()) {
            return Err(MoveError::HandIndexOutOfRange);
        }
        for (pos, i) in indices.iter().enumerate() {
            if indices[..pos].contains(i) {
                return Err(MoveError::DuplicateHandIndex);
            }
        }

        let cards: Vec<_> = indices.iter().map(|&i| hand[i]).collect();
        if !can_meld(&cards, player.has_opened()) {
            return Err(MoveError::InvalidMeld);
        }
        Ok(())
    }

    fn validate_attach(
        &self,
        state: &GameState,
        hand_index: usize,
        meld_index: usize,
    ) -> Result<(), MoveError> {
        require_phase(state, Phase::Play)?;

        let player = state.current_player();
        let card = *player
            .hand()
            .get(hand_index)
            .ok_or(MoveError::HandIndexOutOfRange)?;
        let meld = player
            .melds()
            .get(meld_index)
            .ok_or(MoveError::MeldIndexOutOfRange)?;

        if !can_attach(card, meld) {
            return Err(MoveError::InvalidAttachment);
        }
        Ok(())
    }

    fn validate_discard(&self, state: &GameState, hand_index: usize) -> Result<(), MoveError> {
        require_phase(state, Phase::Play)?;

        let player = state.current_player();
        if !player.has_opened() {
            return Err(MoveError::NotOpened);
        }
        if hand_index >= player.hand().len() {
            return Err(MoveError::HandIndexOutOfRange);
        }
        Ok(())
    }

    // === Transitions ===
    //
    // Each runs after its validate_* succeeded; the Option fallbacks below
    // only guard against a state that changed in between.

    fn draw(&self, state: &mut GameState, source: DrawSource) -> Result<(), MoveError> {
        let drawn = match source {
            DrawSource::Deck => {
                let available = state.deck().len();
                state
                    .deck_mut()
                    .draw_top(DECK_DRAW_COUNT)
                    .ok_or(MoveError::DeckExhausted {
                        needed: DECK_DRAW_COUNT,
                        available,
                    })?
            }
            DrawSource::Discard { index } => {
                if index >= state.discard_pile().len() {
                    return Err(MoveError::DiscardIndexOutOfRange);
                }
                let available = state.deck().len();
                let mut drawn = state
                    .deck_mut()
                    .draw_top(DISCARD_DRAW_DECK_COUNT)
                    .ok_or(MoveError::DeckExhausted {
                        needed: DISCARD_DRAW_DECK_COUNT,
                        available,
                    })?;
                let taken = state.discard_pile_mut().take_from(index).unwrap_or_default();
                drawn.extend(taken);
                drawn
            }
        };

        debug!(
            game_id = %state.id(),
            seat = state.current_seat().0,
            cards = drawn.len(),
            deck = state.deck().len(),
            discard = state.discard_pile().len(),
            "Drew cards"
        );
        state.current_player_mut().add_cards(drawn);
        state.set_phase(Phase::Play);
        Ok(())
    }

    fn meld(&self, state: &mut GameState, indices: &[usize]) {
        let opening = !state.current_player().has_opened();
        let player = state.current_player_mut();
        player.meld_from_hand(indices);
        let melds = player.melds().len();

        debug!(
            game_id = %state.id(),
            seat = state.current_seat().0,
            cards = indices.len(),
            melds,
            opening,
            "Melded"
        );
    }

    fn attach(&self, state: &mut GameState, hand_index: usize, meld_index: usize) {
        state
            .current_player_mut()
            .attach_from_hand(hand_index, meld_index);

        debug!(
            game_id = %state.id(),
            seat = state.current_seat().0,
            meld_index,
            "Attached card"
        );
    }

    fn discard(&self, state: &mut GameState, hand_index: usize) -> Result<(), MoveError> {
        let card = state
            .current_player_mut()
            .remove_card(hand_index)
            .ok_or(MoveError::HandIndexOutOfRange)?;
        state.discard_pile_mut().push_top(card);

        debug!(
            game_id = %state.id(),
            seat = state.current_seat().0,
            %card,
            "Discarded"
        );
        Ok(())
    }

    fn close(&self, state: &mut GameState) -> Result<(), MoveError> {
        let closer = state.current_seat();
        let card = state
            .current_player_mut()
            .remove_card(0)
            .ok_or(MoveError::CannotClose)?;
        state.discard_pile_mut().push_top(card);

        let scores = state.final_scores(closer);
        for (seat, &score) in scores.iter() {
            let delta = score - state.player(seat).score();
            state.player_mut(seat).adjust_score(delta);
        }

        info!(
            game_id = %state.id(),
            closer = closer.0,
            scores = ?scores.values().collect::<Vec<_>>(),
            "Game closed"
        );
        state.set_result(GameResult { closer, scores });
        Ok(())
    }
}

impl RulesEngine for Pinellone {
    fn validate(&self, state: &GameState, action: &Action) -> Result<(), MoveError> {
        if state.is_finished() {
            return Err(MoveError::GameFinished);
        }

        match action {
            Action::Draw(source) => self.validate_draw(state, *source),
            Action::Meld { indices } => self.validate_meld(state, indices),
            Action::Attach {
                hand_index,
                meld_index,
            } => self.validate_attach(state, *hand_index, *meld_index),
            Action::Discard { hand_index } => self.validate_discard(state, *hand_index),
            Action::Close => {
                if state.current_player().can_close() {
                    Ok(())
                } else {
                    Err(MoveError::CannotClose)
                }
            }
        }
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), MoveError> {
        let seat = state.current_seat();

        if let Err(err) = self.validate(state, action) {
            debug!(
                game_id = %state.id(),
                seat = seat.0,
                action = action.name(),
                error = %err,
                "Move rejected"
            );
            return Err(err);
        }

        match action {
            Action::Draw(source) => self.draw(state, *source)?,
            Action::Meld { indices } => self.meld(state, indices),
            Action::Attach {
                hand_index,
                meld_index,
            } => self.attach(state, *hand_index, *meld_index),
            Action::Discard { hand_index } => self.discard(state, *hand_index)?,
            Action::Close => self.close(state)?,
        }

        state.record_action(seat, action.clone());
        state.touch();

        // Discarding ends the turn once the move is on record
        if matches!(action, Action::Discard { .. }) {
            state.advance_turn();
        }
        Ok(())
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.result().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit, DECK_SIZE};
    use crate::core::Seat;
    use crate::zones::Pile;
    use proptest::prelude::*;

    fn new_game(seed: u64) -> (Pinellone, GameState) {
        PinelloneBuilder::new()
            .seed(seed)
            .build(&["Alice", "Bob"])
            .unwrap()
    }

    fn spade(rank: Rank) -> Card {
        Card::normal(rank, Suit::Spades)
    }

    /// Seat 0 holds 3..8 of spades plus `extra`, already in the play phase.
    fn rigged_game(extra: &[Card]) -> (Pinellone, GameState) {
        let mut hand: Vec<Card> = [
            Rank::Three,
            Rank::Four,
            Rank::Five,
            Rank::Six,
            Rank::Seven,
            Rank::Eight,
        ]
        .into_iter()
        .map(spade)
        .collect();
        hand.extend_from_slice(extra);

        let mut hands = vec![hand, vec![Card::normal(Rank::King, Suit::Hearts), Card::Joker]]
            .into_iter();
        let players = PlayerMap::new(PLAYER_COUNT, |seat| {
            PlayerState::new(format!("P{}", seat.0), hands.next().unwrap_or_default())
        });
        let deck = vec![
            Card::normal(Rank::Ten, Suit::Diamonds),
            Card::normal(Rank::Jack, Suit::Diamonds),
            Card::normal(Rank::Queen, Suit::Diamonds),
        ];
        let mut state = GameState::new(players, deck, GameConfig::default());
        state.set_phase(Phase::Play);
        (Pinellone, state)
    }

    /// Everything a rejected move must leave alone.
    fn table(state: &GameState) -> (Pile, Pile, Vec<Vec<Card>>, Phase, usize) {
        let hands = (0..PLAYER_COUNT)
            .map(|i| state.player(Seat::new(i as u8)).hand().to_vec())
            .collect();
        (
            state.deck().clone(),
            state.discard_pile().clone(),
            hands,
            state.phase(),
            state.history().len(),
        )
    }

    /// `rigged_game` back in the draw phase with only `deck_left` deck cards.
    fn short_deck_game(deck_left: usize) -> (Pinellone, GameState) {
        let (game, mut state) = rigged_game(&[]);
        while state.deck().len() > deck_left {
            let card = state.deck_mut().pop_top().unwrap();
            state.discard_pile_mut().push_top(card);
        }
        state.set_phase(Phase::Draw);
        (game, state)
    }

    #[test]
    fn test_game_creation() {
        let (_, state) = new_game(42);

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.player(Seat::new(0)).name(), "Alice");
        assert_eq!(state.player(Seat::new(1)).name(), "Bob");
        assert_eq!(state.player(Seat::new(0)).hand().len(), 15);
        assert_eq!(state.player(Seat::new(1)).hand().len(), 15);
        assert_eq!(state.deck().len(), DECK_SIZE - 30);
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.current_seat(), Seat::new(0));
    }

    #[test]
    fn test_wrong_player_count() {
        let err = PinelloneBuilder::new().build(&["Solo"]).unwrap_err();
        assert_eq!(
            err,
            GameError::PlayerCount {
                expected: 2,
                actual: 1
            }
        );

        let err = PinelloneBuilder::new().build(&["A", "B", "C"]).unwrap_err();
        assert!(matches!(err, GameError::PlayerCount { actual: 3, .. }));
    }

    #[test]
    fn test_insufficient_cards() {
        let err = PinelloneBuilder::new()
            .hand_size(60)
            .build(&["A", "B"])
            .unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientCards {
                needed: 120,
                available: DECK_SIZE
            }
        );
    }

    #[test]
    fn test_seeded_deal_is_reproducible() {
        let (_, a) = new_game(7);
        let (_, b) = new_game(7);

        assert_eq!(a.deck(), b.deck());
        assert_eq!(a.player(Seat::new(0)).hand(), b.player(Seat::new(0)).hand());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_draw_from_deck() {
        let (game, mut state) = new_game(42);
        let deck_before = state.deck().len();

        game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
            .unwrap();

        assert_eq!(state.deck().len(), deck_before - 2);
        assert_eq!(state.current_player().hand().len(), 17);
        assert_eq!(state.phase(), Phase::Play);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_draw_requires_draw_phase() {
        let (game, mut state) = new_game(42);
        game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
            .unwrap();

        let err = game
            .apply_action(&mut state, &Action::Draw(DrawSource::Deck))
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::WrongPhase {
                expected: Phase::Draw,
                actual: Phase::Play
            }
        );
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_draw_from_empty_discard() {
        let (game, mut state) = new_game(42);
        let err = game
            .apply_action(&mut state, &Action::Draw(DrawSource::Discard { index: 0 }))
            .unwrap_err();
        assert_eq!(err, MoveError::EmptyDiscardPile);
        assert_eq!(state.phase(), Phase::Draw);
    }

    #[test]
    fn test_deck_draw_needs_two_cards() {
        let (game, mut state) = short_deck_game(1);
        let before = table(&state);

        assert_eq!(
            game.apply_action(&mut state, &Action::Draw(DrawSource::Deck)),
            Err(MoveError::DeckExhausted {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(table(&state), before);
    }

    #[test]
    fn test_discard_draw_needs_a_deck_card() {
        let (game, mut state) = short_deck_game(0);
        assert_eq!(state.discard_pile().len(), 3);
        let before = table(&state);

        assert_eq!(
            game.apply_action(&mut state, &Action::Draw(DrawSource::Discard { index: 1 })),
            Err(MoveError::DeckExhausted {
                needed: 1,
                available: 0
            })
        );
        assert_eq!(table(&state), before);
        assert_eq!(state.all_cards().count(), 8 + 3);
    }

    #[test]
    fn test_oversized_hand_is_insufficient() {
        let err = PinelloneBuilder::new()
            .hand_size(usize::MAX)
            .build(&["A", "B"])
            .unwrap_err();
        assert!(matches!(err, GameError::InsufficientCards { .. }));
    }

    #[test]
    fn test_play_moves_need_play_phase() {
        let (game, mut state) = new_game(42);

        for action in [
            Action::meld(&[0, 1, 2]),
            Action::Attach {
                hand_index: 0,
                meld_index: 0,
            },
            Action::Discard { hand_index: 0 },
        ] {
            assert!(matches!(
                game.validate(&state, &action),
                Err(MoveError::WrongPhase { .. })
            ));
        }
        assert!(game.apply_action(&mut state, &Action::meld(&[0])).is_err());
    }

    #[test]
    fn test_meld_opening_sestina() {
        let (game, mut state) = rigged_game(&[Card::normal(Rank::Nine, Suit::Hearts)]);

        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();

        let player = state.current_player();
        assert!(player.has_opened());
        assert_eq!(player.hand().len(), 1);
        assert_eq!(player.melds().len(), 1);
        assert_eq!(player.melds()[0].len(), 6);
        assert_eq!(state.phase(), Phase::Play);
    }

    #[test]
    fn test_meld_rejections() {
        let (game, mut state) = rigged_game(&[]);

        // Three cards cannot open
        assert_eq!(
            game.apply_action(&mut state, &Action::meld(&[0, 1, 2])),
            Err(MoveError::InvalidMeld)
        );
        assert_eq!(
            game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 9])),
            Err(MoveError::HandIndexOutOfRange)
        );
        assert_eq!(
            game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 4])),
            Err(MoveError::DuplicateHandIndex)
        );
        assert_eq!(
            game.apply_action(&mut state, &Action::meld(&[])),
            Err(MoveError::InvalidMeld)
        );

        // Nothing moved
        assert_eq!(state.current_player().hand().len(), 6);
        assert!(state.current_player().melds().is_empty());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_attach() {
        let (game, mut state) = rigged_game(&[spade(Rank::Nine), spade(Rank::Jack)]);
        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();

        // Hand is now [9♠, J♠]
        assert_eq!(
            game.apply_action(
                &mut state,
                &Action::Attach {
                    hand_index: 1,
                    meld_index: 0
                }
            ),
            Err(MoveError::InvalidAttachment)
        );
        assert_eq!(
            game.apply_action(
                &mut state,
                &Action::Attach {
                    hand_index: 0,
                    meld_index: 3
                }
            ),
            Err(MoveError::MeldIndexOutOfRange)
        );

        game.apply_action(
            &mut state,
            &Action::Attach {
                hand_index: 0,
                meld_index: 0,
            },
        )
        .unwrap();
        assert_eq!(state.current_player().melds()[0].len(), 7);
        assert_eq!(state.current_player().hand(), &[spade(Rank::Jack)]);
    }

    #[test]
    fn test_discard_requires_opening() {
        let (game, mut state) = rigged_game(&[Card::Joker]);

        assert_eq!(
            game.apply_action(&mut state, &Action::Discard { hand_index: 0 }),
            Err(MoveError::NotOpened)
        );

        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();
        game.apply_action(&mut state, &Action::Discard { hand_index: 0 })
            .unwrap();

        assert_eq!(state.discard_pile().top(), Some(&Card::Joker));
        assert_eq!(state.current_seat(), Seat::new(1));
        assert_eq!(state.phase(), Phase::Draw);
        assert_eq!(state.turn_number(), 2);

        // The discard is recorded against the turn it ended
        let last = state.history().last().cloned().unwrap();
        assert_eq!(last.seat, Seat::new(0));
        assert_eq!(last.turn, 1);
    }

    #[test]
    fn test_close_scoring() {
        let (game, mut state) = rigged_game(&[spade(Rank::King)]);

        assert_eq!(
            game.apply_action(&mut state, &Action::Close),
            Err(MoveError::CannotClose)
        );

        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();
        assert!(state.is_game_over());

        game.apply_action(&mut state, &Action::Close).unwrap();

        // Seat 1 still holds K♥ (10) + Joker (25)
        assert_eq!(state.player(Seat::new(0)).score(), 100);
        assert_eq!(state.player(Seat::new(1)).score(), -35);
        assert!(state.player(Seat::new(0)).hand().is_empty());
        assert_eq!(state.discard_pile().top(), Some(&spade(Rank::King)));

        let result = game.is_terminal(&state).unwrap();
        assert!(result.is_winner(Seat::new(0)));
        assert_eq!(result.score(Seat::new(1)), -35);
    }

    #[test]
    fn test_close_needs_a_single_card_left() {
        let (game, mut state) = rigged_game(&[spade(Rank::King), Card::Joker]);
        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();
        assert!(state.current_player().has_sestina());
        let before = table(&state);

        assert_eq!(
            game.apply_action(&mut state, &Action::Close),
            Err(MoveError::CannotClose)
        );
        assert_eq!(table(&state), before);
        assert_eq!(state.current_player().melds().len(), 1);
        assert!(game.is_terminal(&state).is_none());
        assert_eq!(state.player(Seat::new(0)).score(), 0);
    }

    #[test]
    fn test_moves_rejected_after_close() {
        let (game, mut state) = rigged_game(&[spade(Rank::King)]);
        game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
            .unwrap();
        game.apply_action(&mut state, &Action::Close).unwrap();

        for action in [
            Action::Close,
            Action::Draw(DrawSource::Deck),
            Action::Discard { hand_index: 0 },
        ] {
            assert_eq!(
                game.apply_action(&mut state, &action),
                Err(MoveError::GameFinished)
            );
        }
        assert_eq!(state.player(Seat::new(0)).score(), 100);
    }

    proptest! {
        /// Property: a discard-pile draw takes one deck card plus the whole
        /// suffix from the chosen index, and truncates the pile there
        #[test]
        fn prop_discard_draw_takes_suffix(
            seed in any::<u64>(),
            pile_len in 1usize..20,
            pick in any::<prop::sample::Index>(),
        ) {
            let (game, mut state) = new_game(seed);
            for _ in 0..pile_len {
                let card = state.deck_mut().pop_top().unwrap();
                state.discard_pile_mut().push_top(card);
            }

            let index = pick.index(pile_len);
            let deck_before = state.deck().len();
            let hand_before = state.current_player().hand().len();
            let suffix = state.discard_pile().as_slice()[index..].to_vec();

            game.apply_action(&mut state, &Action::Draw(DrawSource::Discard { index }))
                .unwrap();

            prop_assert_eq!(state.discard_pile().len(), index);
            prop_assert_eq!(state.deck().len(), deck_before - 1);
            prop_assert_eq!(
                state.current_player().hand().len(),
                hand_before + 1 + suffix.len()
            );
            for card in &suffix {
                prop_assert!(state.current_player().hand().contains(card));
            }
            prop_assert_eq!(state.all_cards().count(), DECK_SIZE);
        }
    }

    #[test]
    fn test_legal_actions_filter() {
        let (game, state) = new_game(42);
        let candidates = [
            Action::Draw(DrawSource::Deck),
            Action::Draw(DrawSource::Discard { index: 0 }),
            Action::Close,
        ];

        let legal = game.legal_actions(&state, &candidates);
        assert_eq!(legal, vec![Action::Draw(DrawSource::Deck)]);
    }
}
