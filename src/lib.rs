//! # siege-routes
//!
//! Rules engine for a two-player siege game on a 6×6 board.
//!
//! ## Design Principles
//!
//! 1. **One Owner of State**: `GameState` is a plain value. Only
//!    `SiegeRules::apply_action` advances it; rendering, sessions and AI
//!    read it.
//!
//! 2. **Reject Without Side Effects**: every refused action returns an
//!    `ActionError` and leaves the state exactly as it was.
//!
//! 3. **Tokens Are Conserved**: every token is allocated at game start and
//!    only changes location (reserve, board, captive, void).
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs`, so AI search
//!   and legal-move filtering can clone states freely.
//!
//! - **Deterministic**: the route deck is shuffled from a seed; a match is
//!   reproduced by replaying its `ActionRecord`s.
//!
//! ## Modules
//!
//! - `core`: players, actions, errors, configuration, RNG, game state
//! - `board`: coordinates, directions, projection
//! - `routes`: the 28-card route catalog, hands, queue and deck
//! - `tokens`: token registry and resource ledger
//! - `siege`: siege status of on-board tokens
//! - `moves`: route-play validation and execution
//! - `special`: special actions and their costs
//! - `rules`: the turn/phase state machine and invariants
//! - `rating`: post-game rating updates

pub mod board;
pub mod core;
pub mod moves;
pub mod rating;
pub mod routes;
pub mod rules;
pub mod siege;
pub mod special;
pub mod tokens;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRecord, GameOver, GameOverReason, GameRng, GameState, LastMove,
    MoveKind, Phase, Player, PlayerMap, RulesConfig,
};

pub use crate::board::{Coord, Direction};

pub use crate::routes::{RouteCard, RouteId};

pub use crate::tokens::{TokenId, TokenLocation};

pub use crate::siege::SiegeStatus;

pub use crate::rules::{
    check_invariants, InvariantViolation, PositionBuilder, RulesEngine, SiegeRules, Transition,
};

pub use crate::rating::{MatchFormat, MatchReport, Participant, RatingBook, RatingConfig};
