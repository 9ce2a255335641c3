//! Player actions and the records kept about them.
//!
//! An `Action` is everything a session can submit on behalf of a player.
//! The engine accepts or rejects it as a whole; accepted actions are logged
//! as `ActionRecord`s so a match can be replayed from its seed.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::Player;
use crate::board::Coord;
use crate::routes::RouteId;
use crate::tokens::TokenId;

/// A complete player input.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Put a reserve token on an empty cell (OPENING or REINFORCE).
    Place { at: Coord },

    /// Play a route card on one of your tokens (ACTION).
    PlayRoute { route: RouteId, token: TokenId },

    /// Give up the whole hand because no route can be played (ACTION).
    ForcedYield,

    /// Pay 2 reserves for a second reinforcement this turn.
    EarlyReinforcement,

    /// Pay 2 captives to bring one of your void tokens back to reserve.
    Ransom,

    /// Pay 2 captives to make this turn's hand/queue swap now (ACTION).
    EarlyRouteSwap { hand: RouteId, queue: RouteId },

    /// Once per game, during the opponent's turn: step a token one cell.
    Evasion { token: TokenId, to: Coord },

    /// Exchange a hand card with a queue card (SWAP).
    SwapRoute { hand: RouteId, queue: RouteId },

    /// Keep the hand as it is (SWAP).
    SkipSwap,

    /// Concede. Either player, any time before the game ends.
    Resign,

    /// The session's clock expired for `flagged`.
    Timeout { flagged: Player },
}

impl Action {
    /// Short name used in warnings and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Place { .. } => "place",
            Action::PlayRoute { .. } => "play route",
            Action::ForcedYield => "forced yield",
            Action::EarlyReinforcement => "early reinforcement",
            Action::Ransom => "ransom",
            Action::EarlyRouteSwap { .. } => "early route swap",
            Action::Evasion { .. } => "evasion",
            Action::SwapRoute { .. } => "swap route",
            Action::SkipSwap => "skip swap",
            Action::Resign => "resign",
            Action::Timeout { .. } => "timeout",
        }
    }

    /// Meta actions end the game rather than play it.
    #[must_use]
    pub fn is_meta(&self) -> bool {
        matches!(self, Action::Resign | Action::Timeout { .. })
    }
}

/// A recorded action with metadata for replay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: Player,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (0 during the opening).
    pub turn: u32,

    /// Sequence number across the whole match.
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: Player, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

/// What kind of board change the last move was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Placement,
    Relocation,
    Invasion,
    Evasion,
}

/// The most recent board change, for ghost/undo display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub player: Player,
    pub token: TokenId,
    /// `None` for placements and evasions out of captivity.
    pub from: Option<Coord>,
    pub to: Coord,
    pub kind: MoveKind,
    /// Tokens taken by this move (invaded defender first, then siege captures).
    pub captured: SmallVec<[TokenId; 4]>,
    pub turn: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names() {
        assert_eq!(Action::ForcedYield.name(), "forced yield");
        assert_eq!(
            Action::PlayRoute { route: RouteId(3), token: TokenId(1) }.name(),
            "play route"
        );
    }

    #[test]
    fn test_meta_actions() {
        assert!(Action::Resign.is_meta());
        assert!(Action::Timeout { flagged: Player::Wake }.is_meta());
        assert!(!Action::SkipSwap.is_meta());
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::Evasion { token: TokenId(7), to: Coord::new(1, 2) };
        let record = ActionRecord::new(Player::Brake, action, 4, 19);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }
}
