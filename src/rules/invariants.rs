//! Whole-state consistency checks.
//!
//! These must never fire for a state produced by `SiegeRules`. A violation
//! means an engine defect, not a rule the players broke. `SiegeRules`
//! audits after every accepted action; tests call `check_invariants` directly.

use crate::core::{GameState, Phase, Player};
use crate::tokens::TokenLocation;

/// A broken consistency rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// What is inconsistent.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check every invariant. Empty means the state is consistent.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let per_player = usize::from(state.config.reserves_per_player);

    if state.tokens.len() != state.config.total_tokens() {
        violations.push(InvariantViolation::new(format!(
            "{} tokens allocated, expected {}",
            state.tokens.len(),
            state.config.total_tokens()
        )));
    }

    for player in Player::all() {
        let counts = state.tokens.counts(player);

        // Conservation: reserves + on board + captured by the enemy + void.
        if counts.total() != per_player {
            violations.push(InvariantViolation::new(format!(
                "{player} owns {} tokens, expected {per_player}",
                counts.total()
            )));
        }

        let ledger = state.ledger.player(player);
        if usize::from(ledger.reserves) != counts.reserve {
            violations.push(InvariantViolation::new(format!(
                "{player} ledger reserves {} but {} tokens are in reserve",
                ledger.reserves, counts.reserve
            )));
        }
        let held = state.tokens.held_by(player);
        if usize::from(ledger.captives) != held {
            violations.push(InvariantViolation::new(format!(
                "{player} ledger captives {} but holds {held}",
                ledger.captives
            )));
        }
    }

    let void = state
        .tokens
        .iter()
        .filter(|t| t.location == TokenLocation::Void)
        .count();
    if usize::from(state.ledger.void_count()) != void {
        violations.push(InvariantViolation::new(format!(
            "ledger void {} but {void} tokens are in the void",
            state.ledger.void_count()
        )));
    }

    if let Some(token) = state
        .tokens
        .iter()
        .find(|t| t.location == TokenLocation::Captive(t.owner))
    {
        violations.push(InvariantViolation::new(format!(
            "{} is held captive by its own owner",
            token.id
        )));
    }

    if let Some(message) = state.tokens.occupancy_violation() {
        violations.push(InvariantViolation::new(message));
    }
    if let Some(message) = state.routes.partition_violation() {
        violations.push(InvariantViolation::new(message));
    }

    if state.game_over.is_some() != (state.phase == Phase::GameOver) {
        violations.push(InvariantViolation::new(format!(
            "phase {} disagrees with game_over {:?}",
            state.phase, state.game_over
        )));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;
    use crate::core::RulesConfig;
    use crate::tokens::TokenId;

    #[test]
    fn test_fresh_state_is_consistent() {
        let state = GameState::new(RulesConfig::default(), 3).unwrap();
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_detects_ledger_drift() {
        let mut state = GameState::new(RulesConfig::default(), 3).unwrap();
        // Bypass the registry: ledger now disagrees with token locations.
        state
            .ledger
            .record_transfer(Player::Wake, TokenLocation::Reserve, TokenLocation::Void);

        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("reserves"));
        assert!(violations[1].to_string().contains("void"));
    }

    #[test]
    fn test_detects_self_captive() {
        let mut state = GameState::new(RulesConfig::default(), 3).unwrap();
        state
            .tokens
            .relocate(&mut state.ledger, TokenId(0), TokenLocation::Captive(Player::Wake));

        let violations = check_invariants(&state);
        assert!(violations.iter().any(|v| v.message.contains("own owner")));
    }

    #[test]
    fn test_detects_allocation_mismatch() {
        let mut state = GameState::new(RulesConfig::default(), 3).unwrap();
        state.config = state.config.clone().with_reserves(20);

        let violations = check_invariants(&state);
        assert!(violations[0].message.contains("36 tokens allocated, expected 40"));
    }

    #[test]
    fn test_detects_phase_mismatch() {
        let mut state = GameState::new(RulesConfig::default(), 3).unwrap();
        state.phase = Phase::GameOver;
        assert_eq!(check_invariants(&state).len(), 1);

        state.phase = Phase::Opening;
        state
            .tokens
            .relocate(&mut state.ledger, TokenId(0), TokenLocation::OnBoard(Coord::new(1, 1)));
        assert!(check_invariants(&state).is_empty());
    }
}
