//! Route moves: validation and execution.
//!
//! A route card jumps one token `distance` cells in `direction`:
//!
//! 1. Off the grid: `OutOfBounds`.
//! 2. Empty destination: relocation.
//! 3. Enemy on the destination: invasion, the defender becomes a captive.
//! 4. Own token on the destination: `OccupiedBySelf`.
//!
//! Locked tokens (4+ enemy neighbours) cannot move.

pub mod executor;
pub mod validator;

pub use executor::{execute_route, MoveOutcome};
pub use validator::{has_playable_route, playable_routes, validate_route, RoutePlan};
