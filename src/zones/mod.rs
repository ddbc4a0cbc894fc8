//! Card locations outside the players' hands and melds.
//!
//! The deck and the discard pile are both ordered piles with the top at the
//! end. See `Pile`.

pub mod pile;

pub use pile::Pile;
