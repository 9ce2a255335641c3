//! Route cards: the immutable catalog and the per-match deck/hand/queue.

pub mod catalog;
pub mod hands;

pub use catalog::{catalog, fresh_deck, RouteCard, RouteId, CATALOG, CATALOG_SIZE};
pub use hands::{Hand, RouteHands};
