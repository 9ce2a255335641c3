//! Tokens and the resources they represent.
//!
//! - `registry`: token identity, ownership, location, board occupancy
//! - `ledger`: reserve/captive/void counts and the once-per-game evasion flag

pub mod ledger;
pub mod registry;

pub use ledger::{Ledger, ResourceLedger};
pub use registry::{LocationCounts, Token, TokenId, TokenLocation, TokenRegistry};
