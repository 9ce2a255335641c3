//! Rules engine: the trait, the siege-routes implementation, and its checks.
//!
//! Sessions and AI players call into `RulesEngine`; `SiegeRules` is the
//! only implementation and the only code that advances a `GameState`.

pub mod engine;
pub mod invariants;
pub mod setup;
pub mod turn;

pub use engine::{RulesEngine, Transition};
pub use invariants::{check_invariants, InvariantViolation};
pub use setup::PositionBuilder;
pub use turn::{is_eliminated, is_siegemated, ReplayError, SiegeRules};
