//! Game configuration.
//!
//! The table size is fixed at two. What varies between games is the deal
//! size, the shuffle seed and the closing bonus:
//!
//! ```
//! use pinellone::core::GameConfig;
//!
//! let config = GameConfig::default().with_seed(7).with_hand_size(13);
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.hand_size, 13);
//! assert_eq!(config.close_bonus, 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::DEFAULT_HAND_SIZE;

/// Bonus awarded to the player who closes.
pub const DEFAULT_CLOSE_BONUS: i64 = 100;

/// Per-game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player.
    pub hand_size: usize,

    /// Shuffle seed. `None` draws a fresh seed from the OS for every game.
    pub seed: Option<u64>,

    /// Points added to the closing player's score.
    pub close_bonus: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            seed: None,
            close_bonus: DEFAULT_CLOSE_BONUS,
        }
    }
}

impl GameConfig {
    /// Set the number of cards dealt to each player.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    /// Fix the shuffle seed (reproducible deals).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the closing bonus.
    #[must_use]
    pub fn with_close_bonus(mut self, bonus: i64) -> Self {
        self.close_bonus = bonus;
        self
    }
}
