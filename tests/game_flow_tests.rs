//! End-to-end turns through the rules engine.
//!
//! Hands are rigged through the public constructors so every move in a
//! scenario is known to be legal (or known to be rejected).

use pinellone::cards::{Card, Rank, Suit, DECK_SIZE};
use pinellone::core::{
    Action, DrawSource, GameConfig, GameState, MoveError, Phase, PlayerMap, PlayerState, Seat,
    PLAYER_COUNT,
};
use pinellone::games::pinellone::{GameView, HandView, Pinellone, PinelloneBuilder};
use pinellone::rules::RulesEngine;

fn cards(ranks: &[Rank], suit: Suit) -> Vec<Card> {
    ranks.iter().map(|&r| Card::normal(r, suit)).collect()
}

const SESTINA_RANKS: [Rank; 6] = [
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
];

fn rigged(hands: [Vec<Card>; 2], deck: Vec<Card>) -> (Pinellone, GameState) {
    let mut hands = hands.into_iter();
    let players = PlayerMap::new(PLAYER_COUNT, |seat| {
        PlayerState::new(format!("Player {}", seat.0), hands.next().unwrap_or_default())
    });
    (Pinellone, GameState::new(players, deck, GameConfig::default()))
}

/// Seat 0: 3..8 of spades plus nine hearts (15). Seat 1: twelve diamonds
/// plus three clubs (15). The deck holds clubs only, which sort after
/// spades and hearts.
fn fifteen_card_table() -> (Pinellone, GameState) {
    let mut seat0 = cards(&SESTINA_RANKS, Suit::Spades);
    seat0.extend(cards(&Rank::ALL[..9], Suit::Hearts));

    let mut seat1 = cards(&Rank::ALL, Suit::Diamonds);
    seat1.extend(cards(&Rank::ALL[..3], Suit::Clubs));

    let mut deck = cards(&Rank::ALL, Suit::Clubs);
    deck.extend(cards(&Rank::ALL, Suit::Clubs));

    rigged([seat0, seat1], deck)
}

#[test]
fn test_opening_turn_scenario() {
    let (game, mut state) = fifteen_card_table();
    let deck_before = state.deck().len();

    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    assert_eq!(state.current_player().hand().len(), 17);
    assert_eq!(state.phase(), Phase::Play);

    game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
        .unwrap();
    assert_eq!(state.current_player().hand().len(), 11);
    assert!(state.current_player().has_opened());

    game.apply_action(&mut state, &Action::Discard { hand_index: 0 })
        .unwrap();
    assert_eq!(state.player(Seat::new(0)).hand().len(), 10);
    assert_eq!(state.phase(), Phase::Draw);
    assert_eq!(state.current_seat(), Seat::new(1));

    assert_eq!(state.deck().len(), deck_before - 2);
    assert_eq!(state.discard_pile().len(), 1);
    assert_eq!(state.history().len(), 3);
}

#[test]
fn test_draw_from_discard_takes_suffix_and_one_deck_card() {
    let (game, mut state) = fifteen_card_table();
    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
        .unwrap();
    game.apply_action(&mut state, &Action::Discard { hand_index: 0 })
        .unwrap();

    let discarded = *state.discard_pile().top().unwrap();
    let deck_before = state.deck().len();

    // Out of range first, then the real pickup
    assert_eq!(
        game.apply_action(&mut state, &Action::Draw(DrawSource::Discard { index: 1 })),
        Err(MoveError::DiscardIndexOutOfRange)
    );
    game.apply_action(&mut state, &Action::Draw(DrawSource::Discard { index: 0 }))
        .unwrap();

    let seat1 = state.player(Seat::new(1));
    assert_eq!(seat1.hand().len(), 17);
    assert!(seat1.hand().contains(&discarded));
    assert!(state.discard_pile().is_empty());
    assert_eq!(state.deck().len(), deck_before - 1);
    assert_eq!(state.phase(), Phase::Play);
}

#[test]
fn test_second_player_cannot_discard_before_opening() {
    let (game, mut state) = fifteen_card_table();
    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
        .unwrap();
    game.apply_action(&mut state, &Action::Discard { hand_index: 0 })
        .unwrap();

    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    assert_eq!(
        game.apply_action(&mut state, &Action::Discard { hand_index: 0 }),
        Err(MoveError::NotOpened)
    );

    // Diamonds 3..8 sit right after the ace at index 0
    assert_eq!(
        game.apply_action(&mut state, &Action::meld(&[1, 2, 3])),
        Err(MoveError::InvalidMeld)
    );
    game.apply_action(&mut state, &Action::meld(&[1, 2, 3, 4, 5, 6]))
        .unwrap();
    game.apply_action(&mut state, &Action::Discard { hand_index: 0 })
        .unwrap();
    assert_eq!(state.current_seat(), Seat::new(0));
    assert_eq!(state.turn_number(), 3);
}

#[test]
fn test_close_in_one_turn() {
    let mut seat0 = cards(&SESTINA_RANKS, Suit::Spades);
    seat0.push(Card::normal(Rank::King, Suit::Hearts));
    let seat1 = vec![
        Card::normal(Rank::Ace, Suit::Diamonds),
        Card::normal(Rank::Five, Suit::Clubs),
        Card::Joker,
    ];
    let deck = cards(&[Rank::Jack, Rank::Nine, Rank::Ten], Suit::Spades);
    let (game, mut state) = rigged([seat0, seat1], deck);

    // Top of the deck is 10♠ then 9♠
    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
        .unwrap();

    // Hand is [9♠, 10♠, K♥]
    for _ in 0..2 {
        game.apply_action(
            &mut state,
            &Action::Attach {
                hand_index: 0,
                meld_index: 0,
            },
        )
        .unwrap();
    }
    assert_eq!(state.current_player().melds()[0].len(), 8);
    assert!(state.is_game_over());

    let before = GameView::project(&state, None);
    assert!(before.is_game_over);
    assert!(before.players[0].can_close);
    assert!(before.result.is_none());

    game.apply_action(&mut state, &Action::Close).unwrap();

    // A♦ 15 + 5♣ 5 + Joker 25
    assert_eq!(state.player(Seat::new(0)).score(), 100);
    assert_eq!(state.player(Seat::new(1)).score(), -45);
    assert_eq!(
        state.discard_pile().top(),
        Some(&Card::normal(Rank::King, Suit::Hearts))
    );

    let result = game.is_terminal(&state).unwrap();
    assert_eq!(result.closer, Seat::new(0));
    assert_eq!(result.scores[Seat::new(1)], -45);

    assert_eq!(
        game.apply_action(&mut state, &Action::Draw(DrawSource::Deck)),
        Err(MoveError::GameFinished)
    );
}

#[test]
fn test_views_after_moves() {
    let (game, mut state) = fifteen_card_table();
    game.apply_action(&mut state, &Action::Draw(DrawSource::Deck))
        .unwrap();
    game.apply_action(&mut state, &Action::meld(&[0, 1, 2, 3, 4, 5]))
        .unwrap();

    let owner = state.player(Seat::new(0)).id();
    let view = GameView::project(&state, Some(owner));
    let me = &view.players[0];
    let them = &view.players[1];

    assert_eq!(me.hand.count(), 11);
    assert!(me.hand.cards().is_some());
    assert_eq!(them.hand, HandView::Hidden { count: 15 });

    // Melds are public to everyone, with their scoring
    let observer = GameView::project(&state, None);
    let meld = &observer.players[0].melds[0];
    assert!(meld.is_sestina);
    assert_eq!(meld.value, 90);
    assert!(observer.players[0].has_opened);
    assert!(!observer.players[1].has_opened);
}

#[test]
fn test_random_game_random_moves_conserve_cards() {
    let (game, mut state) = PinelloneBuilder::new().seed(99).build(&["A", "B"]).unwrap();

    // Draw, try some melds, discard when possible; stop when stuck
    for _ in 0..40 {
        if game
            .apply_action(&mut state, &Action::Draw(DrawSource::Deck))
            .is_err()
        {
            break;
        }
        let hand_len = state.current_player().hand().len();
        for start in 0..hand_len.saturating_sub(6) {
            let indices: Vec<usize> = (start..start + 6).collect();
            if game.apply_action(&mut state, &Action::meld(&indices)).is_ok() {
                break;
            }
        }
        if game
            .apply_action(&mut state, &Action::Discard { hand_index: 0 })
            .is_err()
        {
            break;
        }
    }

    assert_eq!(state.all_cards().count(), DECK_SIZE);
}
