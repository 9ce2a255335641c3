//! Idempotent record of rated matches.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, info};

use super::config::RatingConfig;
use super::elo::{compute, MatchReport, RatingOutcome};

/// Reports the book refuses to rate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("{id} cannot play against themselves")]
    SelfMatch { id: String },
}

/// Rated matches by game id.
///
/// Recording the same game id again returns the first result unchanged,
/// so a resubmitted game-over event never moves a rating twice.
#[derive(Clone, Debug, Default)]
pub struct RatingBook {
    config: RatingConfig,
    processed: FxHashMap<String, RatingOutcome>,
}

impl RatingBook {
    pub fn new(config: RatingConfig) -> Self {
        Self {
            config,
            processed: FxHashMap::default(),
        }
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// Rate a match once.
    pub fn record(&mut self, game_id: &str, report: &MatchReport) -> Result<RatingOutcome, RatingError> {
        if let Some(done) = self.processed.get(game_id) {
            debug!(game_id, "match already rated");
            return Ok(done.clone());
        }
        if report.winner().id == report.loser().id {
            return Err(RatingError::SelfMatch {
                id: report.winner().id.clone(),
            });
        }

        let outcome = compute(&self.config, report);
        info!(
            game_id,
            winner = %outcome.winner.id,
            gain = outcome.winner.delta(),
            loser = %outcome.loser.id,
            loss = outcome.loser.delta(),
            reason = ?report.outcome.reason,
            "match rated"
        );
        self.processed.insert(game_id.to_owned(), outcome.clone());
        Ok(outcome)
    }

    /// Result for a game id, if rated.
    #[must_use]
    pub fn get(&self, game_id: &str) -> Option<&RatingOutcome> {
        self.processed.get(game_id)
    }

    /// Number of rated matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameOver, GameOverReason, Player};
    use crate::rating::{MatchFormat, Participant};

    fn report(wake: i32) -> MatchReport {
        MatchReport::from_game_over(
            MatchFormat::Ranked,
            Participant::new("alice", wake),
            Participant::new("bob", 1500),
            GameOver {
                winner: Player::Brake,
                reason: GameOverReason::Elimination,
            },
        )
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut book = RatingBook::default();

        let first = book.record("g-1", &report(1500)).unwrap();
        // A resubmission with stale ratings still yields the first result.
        let again = book.record("g-1", &report(1700)).unwrap();

        assert_eq!(first, again);
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("g-1").unwrap().winner.id, "bob");
    }

    #[test]
    fn test_distinct_games_rated_separately() {
        let mut book = RatingBook::default();
        book.record("g-1", &report(1500)).unwrap();
        book.record("g-2", &report(1500)).unwrap();
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_self_match_rejected() {
        let mut book = RatingBook::default();
        let mut bad = report(1500);
        bad.seats[Player::Brake].id = "alice".into();

        let err = book.record("g-3", &bad).unwrap_err();
        assert_eq!(err.to_string(), "alice cannot play against themselves");
        assert!(book.is_empty());
    }
}
