//! Player sides and per-player data storage.
//!
//! ## Player
//!
//! A match always has exactly two sides, `Wake` and `Brake`. Wake places
//! first in the opening and moves first in turn 1.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`, used for ledgers, hands,
//! statistics and opening counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// First player.
    Wake,
    /// Second player.
    Brake,
}

impl Player {
    /// Both players in seating order.
    pub const ALL: [Player; 2] = [Player::Wake, Player::Brake];

    /// Slot index (Wake = 0, Brake = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Wake => 0,
            Player::Brake => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Wake => Player::Brake,
            Player::Brake => Player::Wake,
        }
    }

    /// Iterate over both players in seating order.
    pub fn all() -> impl Iterator<Item = Player> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Wake => write!(f, "Wake"),
            Player::Brake => write!(f, "Brake"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use siege_routes::core::{Player, PlayerMap};
///
/// let mut reserves: PlayerMap<u32> = PlayerMap::with_value(18);
/// reserves[Player::Brake] -= 1;
///
/// assert_eq!(reserves[Player::Wake], 18);
/// assert_eq!(reserves[Player::Brake], 17);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Wake), factory(Player::Brake)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
