//! Route hands, the shared queue and the remaining deck.
//!
//! ## Flow
//!
//! 1. `deal`: hands for Wake and Brake, then the queue, from the shuffled deck.
//! 2. `consume`: a played card leaves the hand for the used-this-turn pile.
//! 3. `swap`: the SWAP-phase exchange of one hand card with one queue card.
//! 4. `cycle`: at end of turn each used card returns to the deck's back, the
//!    hand takes the queue's front and the queue refills from the deck's front.
//!
//! Every card is always in exactly one of: a hand, the queue, the deck, or
//! the used pile. `partition_violation` verifies that.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::catalog::{RouteId, CATALOG_SIZE};
use crate::core::{Player, PlayerMap};

/// A player's visible cards.
pub type Hand = SmallVec<[RouteId; 4]>;

/// Where every route card currently is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteHands {
    hands: PlayerMap<Hand>,
    queue: Vector<RouteId>,
    deck: Vector<RouteId>,
    used: Hand,
}

impl RouteHands {
    /// Deal `hand_size` cards to each player (Wake first), then `queue_len` to the queue.
    ///
    /// Short decks deal what they can; `RulesConfig::validate` rules that out
    /// for real matches.
    #[must_use]
    pub fn deal(deck: Vec<RouteId>, hand_size: usize, queue_len: usize) -> Self {
        let mut deck: Vector<RouteId> = deck.into_iter().collect();
        let mut hands: PlayerMap<Hand> = PlayerMap::default();

        for player in Player::all() {
            for _ in 0..hand_size {
                if let Some(card) = deck.pop_front() {
                    hands[player].push(card);
                }
            }
        }

        let mut queue = Vector::new();
        for _ in 0..queue_len {
            if let Some(card) = deck.pop_front() {
                queue.push_back(card);
            }
        }

        Self {
            hands,
            queue,
            deck,
            used: Hand::new(),
        }
    }

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: Player) -> &[RouteId] {
        &self.hands[player]
    }

    /// The shared queue, front first.
    #[must_use]
    pub fn queue(&self) -> &Vector<RouteId> {
        &self.queue
    }

    /// The undealt deck, front first.
    #[must_use]
    pub fn deck(&self) -> &Vector<RouteId> {
        &self.deck
    }

    /// Cards played (or yielded) this turn, awaiting `cycle`.
    #[must_use]
    pub fn used(&self) -> &[RouteId] {
        &self.used
    }

    /// Does the player hold this card?
    #[must_use]
    pub fn in_hand(&self, player: Player, route: RouteId) -> bool {
        self.hands[player].contains(&route)
    }

    /// Was this card already played this turn?
    #[must_use]
    pub fn is_used(&self, route: RouteId) -> bool {
        self.used.contains(&route)
    }

    /// Move a card from the player's hand to the used pile.
    ///
    /// Returns true if the card was in the hand.
    pub fn consume(&mut self, player: Player, route: RouteId) -> bool {
        let hand = &mut self.hands[player];
        if let Some(pos) = hand.iter().position(|&r| r == route) {
            hand.remove(pos);
            self.used.push(route);
            true
        } else {
            false
        }
    }

    /// Move the player's whole hand to the used pile.
    pub fn yield_hand(&mut self, player: Player) {
        let hand = std::mem::take(&mut self.hands[player]);
        self.used.extend(hand);
    }

    /// Exchange a hand card with a queue card in place.
    ///
    /// Returns false (and changes nothing) unless the player holds
    /// `hand_route` and the queue holds `queue_route`.
    pub fn swap(&mut self, player: Player, hand_route: RouteId, queue_route: RouteId) -> bool {
        let Some(h) = self.hands[player].iter().position(|&r| r == hand_route) else {
            return false;
        };
        let Some(q) = self.queue.index_of(&queue_route) else {
            return false;
        };
        self.hands[player][h] = queue_route;
        self.queue.set(q, hand_route);
        true
    }

    /// End-of-turn refill of the player's hand from the queue.
    ///
    /// Returns the cards that entered the hand.
    pub fn cycle(&mut self, player: Player) -> Hand {
        let mut drawn = Hand::new();
        for used in std::mem::take(&mut self.used) {
            self.deck.push_back(used);
            if let Some(card) = self.queue.pop_front() {
                self.hands[player].push(card);
                drawn.push(card);
            }
            if let Some(card) = self.deck.pop_front() {
                self.queue.push_back(card);
            }
        }
        drawn
    }

    /// Total cards tracked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.hands.iter().map(|(_, h)| h.len()).sum::<usize>()
            + self.queue.len()
            + self.deck.len()
            + self.used.len()
    }

    /// Describe a break of the 28-card partition, if any.
    #[must_use]
    pub fn partition_violation(&self) -> Option<String> {
        let mut seen = [false; CATALOG_SIZE];
        let all = self
            .hands
            .iter()
            .flat_map(|(_, h)| h.iter())
            .chain(self.queue.iter())
            .chain(self.deck.iter())
            .chain(self.used.iter());

        for route in all {
            let Some(slot) = seen.get_mut(usize::from(route.0)) else {
                return Some(format!("{route} is outside the catalog"));
            };
            if *slot {
                return Some(format!("{route} is tracked twice"));
            }
            *slot = true;
        }

        let total = self.total();
        if total != CATALOG_SIZE {
            return Some(format!("{total} route cards tracked, expected {CATALOG_SIZE}"));
        }
        None
    }
}
