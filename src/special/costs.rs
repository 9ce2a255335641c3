//! Fixed special-action costs and paying them into the void.

use crate::core::{ActionError, GameState, Player, Resource};
use crate::tokens::TokenLocation;

/// Tokens a special action sends to the void.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cost {
    /// Own reserve tokens.
    pub reserves: u16,
    /// Enemy tokens held as captives.
    pub captives: u16,
}

impl Cost {
    pub const EARLY_REINFORCEMENT: Cost = Cost { reserves: 2, captives: 0 };
    pub const RANSOM: Cost = Cost { reserves: 0, captives: 2 };
    pub const EARLY_ROUTE_SWAP: Cost = Cost { reserves: 0, captives: 2 };
    pub const EVASION: Cost = Cost { reserves: 1, captives: 1 };

    /// Can `player` afford this? Captives are checked first.
    pub fn check(self, state: &GameState, player: Player) -> Result<(), ActionError> {
        let ledger = state.ledger.player(player);
        if ledger.captives < self.captives {
            return Err(ActionError::InsufficientResources {
                resource: Resource::Captives,
                needed: self.captives,
                available: ledger.captives,
            });
        }
        if ledger.reserves < self.reserves {
            return Err(ActionError::InsufficientResources {
                resource: Resource::Reserves,
                needed: self.reserves,
                available: ledger.reserves,
            });
        }
        Ok(())
    }

    /// Move the tokens to the void, lowest ids first. Call `check` first.
    pub fn pay(self, state: &mut GameState, player: Player) {
        for _ in 0..self.captives {
            if let Some(id) = state.tokens.first_captive_held_by(player) {
                state.tokens.relocate(&mut state.ledger, id, TokenLocation::Void);
            }
        }
        for _ in 0..self.reserves {
            if let Some(id) = state.tokens.first_reserve(player) {
                state.tokens.relocate(&mut state.ledger, id, TokenLocation::Void);
            }
        }
    }
}
