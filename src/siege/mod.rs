//! Siege evaluation.
//!
//! A token's siege status is the number of enemy tokens among its eight
//! neighbours. Cells off the grid contribute nothing, so only interior
//! tokens can ever be fully sieged.
//!
//! | Enemy neighbours | Status |
//! |---|---|
//! | 0–3 | `Free` |
//! | 4–7 | `Locked`: cannot play a route, cannot evade |
//! | 8 | `FullySieged`: captured by the next siege pass |
//!
//! Nothing here is stored; every call recomputes from the registry.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{neighbors8, Coord};
use crate::core::Player;
use crate::tokens::{Token, TokenId, TokenRegistry};

/// Enemy neighbours at which a token becomes locked.
pub const LOCK_THRESHOLD: usize = 4;

/// Enemy neighbours at which a token is fully sieged.
pub const FULL_SIEGE: usize = 8;

/// Derived siege classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SiegeStatus {
    Free,
    Locked,
    FullySieged,
}

impl SiegeStatus {
    /// True for `Locked` and `FullySieged`.
    #[must_use]
    pub fn is_restricted(self) -> bool {
        self >= SiegeStatus::Locked
    }
}

/// Map an enemy-neighbour count to a status.
#[must_use]
pub fn classify(enemy_neighbors: usize) -> SiegeStatus {
    if enemy_neighbors >= FULL_SIEGE {
        SiegeStatus::FullySieged
    } else if enemy_neighbors >= LOCK_THRESHOLD {
        SiegeStatus::Locked
    } else {
        SiegeStatus::Free
    }
}

/// Count neighbours of `at` owned by the opponent of `owner`.
#[must_use]
pub fn enemy_neighbors(tokens: &TokenRegistry, at: Coord, owner: Player) -> usize {
    neighbors8(at)
        .into_iter()
        .filter(|n| tokens.owner_at(*n) == Some(owner.opponent()))
        .count()
}

/// Status of an on-board token; `None` for tokens off the board.
#[must_use]
pub fn status_of(tokens: &TokenRegistry, token: &Token) -> Option<SiegeStatus> {
    let at = token.location.coord()?;
    Some(classify(enemy_neighbors(tokens, at, token.owner)))
}

/// Status of whatever token sits on `at`.
#[must_use]
pub fn status_at(tokens: &TokenRegistry, at: Coord) -> Option<SiegeStatus> {
    tokens.at(at).and_then(|t| status_of(tokens, t))
}

/// Tokens owned by `victim` on or next to any of `around` that are fully sieged.
///
/// This is the single recomputation pass run after a route move. Results are
/// deduplicated and in id order so captures apply deterministically.
#[must_use]
pub fn fully_sieged_near(tokens: &TokenRegistry, around: &[Coord], victim: Player) -> SmallVec<[TokenId; 4]> {
    let mut found: SmallVec<[TokenId; 4]> = SmallVec::new();
    for &center in around {
        let cells = std::iter::once(center).chain(neighbors8(center));
        for c in cells {
            let Some(token) = tokens.at(c) else { continue };
            if token.owner != victim || found.contains(&token.id) {
                continue;
            }
            if status_of(tokens, token) == Some(SiegeStatus::FullySieged) {
                found.push(token.id);
            }
        }
    }
    found.sort_unstable();
    found
}

/// Every on-board token of `player` is locked or worse (and there is at least one).
#[must_use]
pub fn all_restricted(tokens: &TokenRegistry, player: Player) -> bool {
    let mut any = false;
    for token in tokens.on_board(player) {
        any = true;
        if !status_of(tokens, token).is_some_and(SiegeStatus::is_restricted) {
            return false;
        }
    }
    any
}
