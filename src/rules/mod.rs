//! Rules for Pinellone.
//!
//! - `melds`: pure predicates and scoring over card sequences
//! - `engine`: the `RulesEngine` trait a game implements, and `GameResult`
//!
//! The state machine calls into `melds` for every meld, attachment and close
//! but never reimplements those checks itself.

pub mod engine;
pub mod melds;

pub use engine::{GameResult, RulesEngine};
pub use melds::{
    can_attach, can_meld, is_pinnacolone, is_valid_scale, is_valid_sestina, meld_value,
};
