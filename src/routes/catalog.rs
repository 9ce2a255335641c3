//! The fixed 28-card route catalog.
//!
//! Layout: the eight compass directions (clockwise from north) at distances
//! 1–3 take ids 0..24; the four orthogonal distance-4 cards take ids 24..28.

use serde::{Deserialize, Serialize};

use crate::board::Direction;
use crate::core::GameRng;

/// Number of route cards in existence.
pub const CATALOG_SIZE: usize = 28;

/// Route card identifier, `0..CATALOG_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteId(pub u8);

impl RouteId {
    /// Create a route id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The card this id names, or `None` if the id is outside the catalog.
    #[must_use]
    pub fn card(self) -> Option<&'static RouteCard> {
        CATALOG.get(usize::from(self.0))
    }
}

impl std::fmt::Display for RouteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Route({})", self.0)
    }
}

/// A movement instruction: jump `distance` cells in `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteCard {
    pub id: RouteId,
    pub direction: Direction,
    pub distance: u8,
}

impl std::fmt::Display for RouteCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.direction.label(), self.distance)
    }
}

const fn build_catalog() -> [RouteCard; CATALOG_SIZE] {
    let placeholder = RouteCard {
        id: RouteId(0),
        direction: Direction::North,
        distance: 1,
    };
    let mut cards = [placeholder; CATALOG_SIZE];

    let mut i = 0;
    while i < 8 {
        let mut d = 0;
        while d < 3 {
            let id = i * 3 + d;
            cards[id] = RouteCard {
                id: RouteId(id as u8),
                direction: Direction::ALL[i],
                distance: d as u8 + 1,
            };
            d += 1;
        }
        i += 1;
    }

    let long = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    let mut k = 0;
    while k < 4 {
        let id = 24 + k;
        cards[id] = RouteCard {
            id: RouteId(id as u8),
            direction: long[k],
            distance: 4,
        };
        k += 1;
    }

    cards
}

/// The immutable catalog, indexed by `RouteId`.
pub static CATALOG: [RouteCard; CATALOG_SIZE] = build_catalog();

/// Borrow the catalog.
#[must_use]
pub fn catalog() -> &'static [RouteCard] {
    &CATALOG
}

/// All route ids in a seeded shuffled order.
#[must_use]
pub fn fresh_deck(rng: &mut GameRng) -> Vec<RouteId> {
    let mut deck: Vec<RouteId> = CATALOG.iter().map(|c| c.id).collect();
    rng.shuffle(&mut deck);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_catalog_size_and_ids() {
        assert_eq!(catalog().len(), CATALOG_SIZE);
        for (i, card) in catalog().iter().enumerate() {
            assert_eq!(usize::from(card.id.0), i);
        }
    }

    #[test]
    fn test_catalog_distances_respect_direction() {
        for card in catalog() {
            assert!(card.distance >= 1);
            assert!(card.distance <= card.direction.max_distance());
        }
        let fours = catalog().iter().filter(|c| c.distance == 4).count();
        assert_eq!(fours, 4);
    }

    #[test]
    fn test_catalog_has_no_duplicate_moves() {
        let moves: FxHashSet<_> = catalog().iter().map(|c| (c.direction, c.distance)).collect();
        assert_eq!(moves.len(), CATALOG_SIZE);
    }

    #[test]
    fn test_lookup() {
        let card = RouteId::new(24).card().unwrap();
        assert_eq!(card.direction, Direction::North);
        assert_eq!(card.distance, 4);
        assert_eq!(card.to_string(), "N4");
        assert!(RouteId::new(28).card().is_none());
    }

    #[test]
    fn test_fresh_deck_is_seeded_permutation() {
        let deck1 = fresh_deck(&mut GameRng::new(9));
        let deck2 = fresh_deck(&mut GameRng::new(9));
        assert_eq!(deck1, deck2);

        let mut sorted = deck1.clone();
        sorted.sort();
        let ids: Vec<_> = catalog().iter().map(|c| c.id).collect();
        assert_eq!(sorted, ids);
    }
}
