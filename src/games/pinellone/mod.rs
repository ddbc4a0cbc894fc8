//! Pinellone: two-player rummy with jokers and wild black deuces.
//!
//! - Each player is dealt 15 cards from a 104-card pool
//! - On your turn: draw (two from the deck, or one plus a discard-pile
//!   suffix), meld and attach, then discard
//! - The first meld must be a sestina; no discarding before it
//! - Close with one card left and a sestina on the table

mod game;
mod preview;
mod view;

pub use game::{Pinellone, PinelloneBuilder, DECK_DRAW_COUNT, DISCARD_DRAW_DECK_COUNT};
pub use preview::{DrawPreview, PreviewCard};
pub use view::{GameView, HandView, MeldView, PlayerView};
