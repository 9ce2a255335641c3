//! Logistic (Elo) rating updates for a finished match.

use serde::{Deserialize, Serialize};

use super::config::{MatchFormat, RatingConfig};
use crate::core::{GameOver, GameOverReason, Player, PlayerMap};

/// One side of a match as the rating service knows it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    /// Rating before the match.
    pub rating: i32,
}

impl Participant {
    pub fn new(id: impl Into<String>, rating: i32) -> Self {
        Self {
            id: id.into(),
            rating,
        }
    }
}

/// Everything needed to rate a finished match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub format: MatchFormat,
    /// Participants by seat.
    pub seats: PlayerMap<Participant>,
    pub outcome: GameOver,
}

impl MatchReport {
    /// Pair a terminal outcome with the two seats.
    pub fn from_game_over(
        format: MatchFormat,
        wake: Participant,
        brake: Participant,
        outcome: GameOver,
    ) -> Self {
        let mut seats = PlayerMap::new(|_| Participant::new(String::new(), 0));
        seats[Player::Wake] = wake;
        seats[Player::Brake] = brake;
        Self {
            format,
            seats,
            outcome,
        }
    }

    #[must_use]
    pub fn winner(&self) -> &Participant {
        &self.seats[self.outcome.winner]
    }

    #[must_use]
    pub fn loser(&self) -> &Participant {
        &self.seats[self.outcome.loser()]
    }
}

/// One participant's rating movement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChange {
    pub id: String,
    pub before: i32,
    pub after: i32,
}

impl RatingChange {
    #[must_use]
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }
}

/// Rating movement of both participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingOutcome {
    pub winner: RatingChange,
    pub loser: RatingChange,
}

/// Expected score of a player rated `rating` against `opponent`.
#[must_use]
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent - rating) / 400.0))
}

/// Rate one finished match.
///
/// AI participants play at the configured fixed rating and keep it.
#[must_use]
pub fn compute(config: &RatingConfig, report: &MatchReport) -> RatingOutcome {
    let winner = report.winner();
    let loser = report.loser();
    let winner_ai = config.is_ai(&winner.id);
    let loser_ai = config.is_ai(&loser.id);

    let effective = |p: &Participant, ai: bool| if ai { config.ai_fixed_rating } else { p.rating };
    let w = effective(winner, winner_ai);
    let l = effective(loser, loser_ai);

    let k = config.k_factor(report.format);
    let mut gain = k * (1.0 - expected_score(w, l));
    if report.outcome.reason == GameOverReason::Timeout {
        gain *= config.timeout_gain_multiplier;
    }
    let loss = k * expected_score(l, w);

    let moved = |before: i32, delta: f64, ai: bool| {
        if ai {
            before
        } else {
            config.clamp((f64::from(before) + delta).round() as i32)
        }
    };

    RatingOutcome {
        winner: RatingChange {
            id: winner.id.clone(),
            before: w,
            after: moved(w, gain, winner_ai),
        },
        loser: RatingChange {
            id: loser.id.clone(),
            before: l,
            after: moved(l, -loss, loser_ai),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(reason: GameOverReason, wake: i32, brake: i32) -> MatchReport {
        MatchReport::from_game_over(
            MatchFormat::Ranked,
            Participant::new("alice", wake),
            Participant::new("bob", brake),
            GameOver {
                winner: Player::Wake,
                reason,
            },
        )
    }

    #[test]
    fn test_expected_score() {
        assert!((expected_score(1500, 1500) - 0.5).abs() < 1e-9);
        assert!((expected_score(1900, 1500) - 10.0 / 11.0).abs() < 1e-9);
        assert!(expected_score(1200, 1600) < 0.5);
    }

    #[test]
    fn test_even_match() {
        let out = compute(&RatingConfig::default(), &report(GameOverReason::Elimination, 1500, 1500));

        assert_eq!(out.winner.delta(), 16);
        assert_eq!(out.loser.delta(), -16);
        assert_eq!(out.winner.id, "alice");
    }

    #[test]
    fn test_timeout_gain_smaller() {
        let config = RatingConfig::default();
        let elim = compute(&config, &report(GameOverReason::Elimination, 1500, 1500));
        let timeout = compute(&config, &report(GameOverReason::Timeout, 1500, 1500));

        assert!(timeout.winner.delta() < elim.winner.delta());
        assert_eq!(timeout.winner.delta(), 8);
        assert_eq!(timeout.loser.delta(), elim.loser.delta());
    }

    #[test]
    fn test_casual_uses_smaller_k() {
        let mut casual = report(GameOverReason::Siegemate, 1500, 1500);
        casual.format = MatchFormat::Casual;

        let out = compute(&RatingConfig::default(), &casual);
        assert_eq!(out.winner.delta(), 8);
    }

    #[test]
    fn test_clamped() {
        let out = compute(&RatingConfig::default(), &report(GameOverReason::Elimination, 2995, 2995));
        assert_eq!(out.winner.after, 3000);

        let out = compute(&RatingConfig::default(), &report(GameOverReason::Elimination, 105, 105));
        assert_eq!(out.loser.after, 100);
    }

    #[test]
    fn test_ai_keeps_fixed_rating() {
        let config = RatingConfig::default().with_ai_identity("bob").with_ai_rating(1500);
        let out = compute(&config, &report(GameOverReason::Resignation, 1500, 2200));

        assert_eq!(out.loser.before, 1500);
        assert_eq!(out.loser.after, 1500);
        assert_eq!(out.winner.delta(), 16);
    }
}
