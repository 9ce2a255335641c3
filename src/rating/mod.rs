//! Post-game rating updates.
//!
//! The rules engine only reports `GameOver`; this module turns that plus the
//! two participants into rating changes:
//!
//! - Logistic expected score, K-factor per `MatchFormat`
//! - Timeout wins scale the winner's gain down
//! - Ratings clamped to `[floor, ceiling]`
//! - AI opponents play at a fixed rating that never moves

pub mod book;
pub mod config;
pub mod elo;

pub use book::{RatingBook, RatingError};
pub use config::{MatchFormat, RatingConfig};
pub use elo::{compute, expected_score, MatchReport, Participant, RatingChange, RatingOutcome};
