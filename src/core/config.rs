//! Rules configuration.
//!
//! A match is created from a `RulesConfig`. The defaults are the ranked
//! ruleset; casual lobbies and tests build variants with the `with_*`
//! builders. The engine never reads rule constants from anywhere else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::CELL_COUNT;
use crate::routes::CATALOG_SIZE;

/// Tunable rule constants for one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Tokens each player starts with in reserve.
    pub reserves_per_player: u16,

    /// Tokens each player places during the opening.
    pub opening_placements: u16,

    /// Route cards each player holds at the start of a turn.
    pub hand_size: usize,

    /// Route cards in the shared refill queue.
    pub queue_len: usize,

    /// Reinforcement placements owed in a normal REINFORCE phase.
    pub reinforcements_per_turn: u16,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            reserves_per_player: 18,
            opening_placements: 4,
            hand_size: 3,
            queue_len: 3,
            reinforcements_per_turn: 1,
        }
    }
}

impl RulesConfig {
    /// Set the starting reserve per player.
    #[must_use]
    pub fn with_reserves(mut self, reserves: u16) -> Self {
        self.reserves_per_player = reserves;
        self
    }

    /// Set the number of opening placements per player.
    #[must_use]
    pub fn with_opening_placements(mut self, placements: u16) -> Self {
        self.opening_placements = placements;
        self
    }

    /// Set the shared queue length.
    #[must_use]
    pub fn with_queue_len(mut self, len: usize) -> Self {
        self.queue_len = len;
        self
    }

    /// Tokens allocated at game start across both players.
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        usize::from(self.reserves_per_player) * 2
    }

    /// Check that the constants describe a playable match.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHand);
        }
        let dealt = self.hand_size * 2 + self.queue_len;
        if dealt > CATALOG_SIZE {
            return Err(ConfigError::DealExceedsCatalog { dealt });
        }
        if self.opening_placements == 0 || self.opening_placements > self.reserves_per_player {
            return Err(ConfigError::OpeningExceedsReserves {
                opening: self.opening_placements,
                reserves: self.reserves_per_player,
            });
        }
        if usize::from(self.opening_placements) * 2 > CELL_COUNT {
            return Err(ConfigError::OpeningExceedsBoard {
                opening: self.opening_placements,
            });
        }
        Ok(())
    }
}

/// Rejected rules configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Hands must hold at least one route.
    #[error("hand size must be at least 1")]
    EmptyHand,

    /// Hands plus queue need more cards than exist.
    #[error("dealing {dealt} routes exceeds the route catalog")]
    DealExceedsCatalog {
        /// Cards the deal would need.
        dealt: usize,
    },

    /// Opening placements must be between 1 and the starting reserve.
    #[error("opening placements {opening} must be between 1 and reserves {reserves}")]
    OpeningExceedsReserves {
        /// Configured opening placements.
        opening: u16,
        /// Configured reserves.
        reserves: u16,
    },

    /// Both openings must fit on the board.
    #[error("opening placements {opening} per side do not fit on the board")]
    OpeningExceedsBoard {
        /// Configured opening placements.
        opening: u16,
    },
}
