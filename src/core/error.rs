//! Rejections and failures.
//!
//! `ActionError` is the input-rejection taxonomy: every variant is
//! recoverable, leaves the `GameState` untouched, and its `Display` text is
//! the short warning shown to the player.

use thiserror::Error;

use super::player::Player;
use super::state::Phase;
use crate::board::Coord;
use crate::routes::RouteId;
use crate::tokens::TokenId;

/// Which pool a cost is paid from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Reserves,
    Captives,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Reserves => write!(f, "reserves"),
            Resource::Captives => write!(f, "captives"),
        }
    }
}

/// Special actions with a usage limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKind {
    EarlyReinforcement,
    EarlyRouteSwap,
    Evasion,
}

impl std::fmt::Display for SpecialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecialKind::EarlyReinforcement => write!(f, "early reinforcement"),
            SpecialKind::EarlyRouteSwap => write!(f, "early route swap"),
            SpecialKind::Evasion => write!(f, "evasion"),
        }
    }
}

/// A rejected player action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is already over")]
    GameAlreadyOver,

    #[error("it is not {player}'s turn")]
    NotYourTurn { player: Player },

    #[error("{action} is not allowed during {phase}")]
    WrongPhase { action: &'static str, phase: Phase },

    #[error("evasion is only possible during the opponent's turn")]
    NotOpponentsTurn,

    #[error("{player} cannot report a timeout for {flagged}")]
    ForeignTimeout { player: Player, flagged: Player },

    #[error("{route} is not in your hand")]
    RouteNotInHand { route: RouteId },

    #[error("{route} was already used this turn")]
    RouteAlreadyUsedThisTurn { route: RouteId },

    #[error("{route} is not in the queue")]
    RouteNotInQueue { route: RouteId },

    #[error("{token} does not exist")]
    UnknownToken { token: TokenId },

    #[error("{token} does not belong to {player}")]
    NotYourToken { token: TokenId, player: Player },

    #[error("{token} is not on the board")]
    TokenNotOnBoard { token: TokenId },

    #[error("{token} is locked by siege")]
    TokenLocked { token: TokenId },

    #[error("{route} from {from} leaves the board")]
    OutOfBounds { route: RouteId, from: Coord },

    #[error("{at} holds your own token")]
    OccupiedBySelf { at: Coord },

    #[error("{at} is not on the board")]
    CellOffBoard { at: Coord },

    #[error("{at} is occupied")]
    CellOccupied { at: Coord },

    #[error("{to} is not one step from {from}")]
    NotAdjacent { from: Coord, to: Coord },

    #[error("not enough {resource}: need {needed}, have {available}")]
    InsufficientResources {
        resource: Resource,
        needed: u16,
        available: u16,
    },

    #[error("{0} already used")]
    AlreadyUsed(SpecialKind),

    #[error("none of your tokens are in the void")]
    NothingToRansom,

    #[error("a route in hand can still be played")]
    YieldNotAllowed,
}

/// Failure to encode or decode a persisted `GameState`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] bincode::Error),

    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] bincode::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_text() {
        let err = ActionError::InsufficientResources {
            resource: Resource::Captives,
            needed: 2,
            available: 1,
        };
        assert_eq!(err.to_string(), "not enough captives: need 2, have 1");

        let err = ActionError::AlreadyUsed(SpecialKind::Evasion);
        assert_eq!(err.to_string(), "evasion already used");
    }

    #[test]
    fn test_out_of_bounds_text() {
        let err = ActionError::OutOfBounds {
            route: RouteId(24),
            from: Coord::new(0, 0),
        };
        assert_eq!(err.to_string(), "Route(24) from a1 leaves the board");
    }
}
