//! Rating parameters.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// How much a match counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    Ranked,
    Casual,
}

/// Rating constants, injected into `RatingBook`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    /// K-factor for ranked matches.
    pub ranked_k: f64,

    /// K-factor for casual matches.
    pub casual_k: f64,

    /// Scales the winner's gain when the loser ran out of time.
    pub timeout_gain_multiplier: f64,

    /// Lowest rating anyone can fall to.
    pub floor: i32,

    /// Highest rating anyone can reach.
    pub ceiling: i32,

    /// Rating every AI opponent plays at. AI ratings never change.
    pub ai_fixed_rating: i32,

    /// Participant ids that belong to AI opponents.
    pub ai_identities: FxHashSet<String>,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            ranked_k: 32.0,
            casual_k: 16.0,
            timeout_gain_multiplier: 0.5,
            floor: 100,
            ceiling: 3000,
            ai_fixed_rating: 1200,
            ai_identities: FxHashSet::default(),
        }
    }
}

impl RatingConfig {
    /// Register an AI identity.
    #[must_use]
    pub fn with_ai_identity(mut self, id: impl Into<String>) -> Self {
        self.ai_identities.insert(id.into());
        self
    }

    /// Set the rating AI opponents play at.
    #[must_use]
    pub fn with_ai_rating(mut self, rating: i32) -> Self {
        self.ai_fixed_rating = rating;
        self
    }

    /// Set the timeout multiplier.
    #[must_use]
    pub fn with_timeout_multiplier(mut self, multiplier: f64) -> Self {
        self.timeout_gain_multiplier = multiplier;
        self
    }

    /// K-factor for a format.
    #[must_use]
    pub fn k_factor(&self, format: MatchFormat) -> f64 {
        match format {
            MatchFormat::Ranked => self.ranked_k,
            MatchFormat::Casual => self.casual_k,
        }
    }

    /// Is this participant an AI?
    #[must_use]
    pub fn is_ai(&self, id: &str) -> bool {
        self.ai_identities.contains(id)
    }

    /// Clamp into `[floor, ceiling]`.
    #[must_use]
    pub fn clamp(&self, rating: i32) -> i32 {
        rating.clamp(self.floor, self.ceiling)
    }
}
