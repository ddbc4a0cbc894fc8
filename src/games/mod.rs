//! Game implementations built on the core engine.

pub mod pinellone;
