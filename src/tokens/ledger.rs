//! Resource ledger: reserves, captives, void and the evasion flag.
//!
//! The counts are caches of token locations. `TokenRegistry::relocate` calls
//! `record_transfer` for every location change, so the ledger only moves in
//! lock step with the registry. `rules::invariants` cross-checks the two.

use serde::{Deserialize, Serialize};
use tracing::error;

use super::registry::TokenLocation;
use crate::core::{Player, PlayerMap};

/// One player's resource counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceLedger {
    /// Own tokens off-board and available for placement.
    pub reserves: u16,

    /// Enemy tokens this player holds as prisoners.
    pub captives: u16,

    /// Evasion is spent (once per game).
    pub used_evasion: bool,
}

/// Both players' ledgers plus the shared void.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    players: PlayerMap<ResourceLedger>,
    void_count: u16,
}

impl Ledger {
    /// Fresh ledger: full reserves, nothing captured, nothing in the void.
    #[must_use]
    pub fn new(reserves_per_player: u16) -> Self {
        Self {
            players: PlayerMap::with_value(ResourceLedger {
                reserves: reserves_per_player,
                ..ResourceLedger::default()
            }),
            void_count: 0,
        }
    }

    /// A player's counts.
    #[must_use]
    pub fn player(&self, player: Player) -> &ResourceLedger {
        &self.players[player]
    }

    /// Reserves shortcut.
    #[must_use]
    pub fn reserves(&self, player: Player) -> u16 {
        self.players[player].reserves
    }

    /// Captives-held shortcut.
    #[must_use]
    pub fn captives(&self, player: Player) -> u16 {
        self.players[player].captives
    }

    /// Tokens of both sides currently in the void.
    #[must_use]
    pub fn void_count(&self) -> u16 {
        self.void_count
    }

    /// Has this player spent their evasion?
    #[must_use]
    pub fn used_evasion(&self, player: Player) -> bool {
        self.players[player].used_evasion
    }

    /// Mark evasion spent.
    pub fn mark_evasion_used(&mut self, player: Player) {
        self.players[player].used_evasion = true;
    }

    /// Account for a token owned by `owner` moving between locations.
    pub fn record_transfer(&mut self, owner: Player, from: TokenLocation, to: TokenLocation) {
        match from {
            TokenLocation::Reserve => {
                Self::decrement(&mut self.players[owner].reserves, "reserves", owner);
            }
            TokenLocation::Captive(holder) => {
                Self::decrement(&mut self.players[holder].captives, "captives", holder);
            }
            TokenLocation::Void => {
                Self::decrement(&mut self.void_count, "void", owner);
            }
            TokenLocation::OnBoard(_) => {}
        }

        match to {
            TokenLocation::Reserve => self.players[owner].reserves += 1,
            TokenLocation::Captive(holder) => self.players[holder].captives += 1,
            TokenLocation::Void => self.void_count += 1,
            TokenLocation::OnBoard(_) => {}
        }
    }

    /// Clamp at zero: an underflow is an engine defect, never a game outcome.
    fn decrement(count: &mut u16, what: &str, player: Player) {
        match count.checked_sub(1) {
            Some(next) => *count = next,
            None => {
                error!(%player, what, "ledger count would go negative; clamped at 0");
                debug_assert!(false, "{what} underflow for {player}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    #[test]
    fn test_new_ledger() {
        let ledger = Ledger::new(18);

        for player in Player::all() {
            assert_eq!(ledger.reserves(player), 18);
            assert_eq!(ledger.captives(player), 0);
            assert!(!ledger.used_evasion(player));
        }
        assert_eq!(ledger.void_count(), 0);
    }

    #[test]
    fn test_placement_and_capture() {
        let mut ledger = Ledger::new(5);
        let cell = TokenLocation::OnBoard(Coord::new(2, 2));

        ledger.record_transfer(Player::Wake, TokenLocation::Reserve, cell);
        assert_eq!(ledger.reserves(Player::Wake), 4);

        ledger.record_transfer(Player::Wake, cell, TokenLocation::Captive(Player::Brake));
        assert_eq!(ledger.captives(Player::Brake), 1);
        assert_eq!(ledger.captives(Player::Wake), 0);
    }

    #[test]
    fn test_void_round_trip() {
        let mut ledger = Ledger::new(5);

        ledger.record_transfer(Player::Brake, TokenLocation::Reserve, TokenLocation::Void);
        assert_eq!(ledger.void_count(), 1);
        assert_eq!(ledger.reserves(Player::Brake), 4);

        ledger.record_transfer(Player::Brake, TokenLocation::Void, TokenLocation::Reserve);
        assert_eq!(ledger.void_count(), 0);
        assert_eq!(ledger.reserves(Player::Brake), 5);
    }

    #[test]
    fn test_evasion_flag() {
        let mut ledger = Ledger::new(5);
        ledger.mark_evasion_used(Player::Brake);

        assert!(ledger.used_evasion(Player::Brake));
        assert!(!ledger.used_evasion(Player::Wake));
    }
}
