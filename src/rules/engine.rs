//! Rules engine trait.
//!
//! This is the boundary the session and AI collaborators program against:
//! - What actions are legal
//! - How an action changes the state
//! - Whether the match is over

use crate::core::{Action, ActionError, GameOver, GameState, Phase, Player, RulesConfig};

/// Result of an accepted action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the action (and any automatic follow-up phases).
    pub phase: Phase,
    /// Player to move afterwards.
    pub to_move: Player,
    /// Set only by the action that ended the match.
    pub game_over: Option<GameOver>,
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: every action `apply_action` would accept, excluding
///   `Resign` and `Timeout`
/// - `apply_action`: deterministic; on `Err` the state is unchanged
/// - `is_terminal`: `None` while the match continues
pub trait RulesEngine {
    /// Rule constants.
    fn config(&self) -> &RulesConfig;

    /// Deal a new match.
    fn new_game(&self, seed: u64) -> GameState;

    /// Enumerate the actions `player` may take now.
    fn legal_actions(&self, state: &GameState, player: Player) -> Vec<Action>;

    /// Apply one action for `player`.
    fn apply_action(
        &self,
        state: &mut GameState,
        player: Player,
        action: &Action,
    ) -> Result<Transition, ActionError>;

    /// The outcome, once decided.
    fn is_terminal(&self, state: &GameState) -> Option<GameOver> {
        state.game_over
    }

    // === Convenience Methods ===

    /// Legal actions of both players, mover first.
    ///
    /// The non-mover's entries are evasions.
    fn legal_actions_all(&self, state: &GameState) -> Vec<(Player, Action)> {
        let mover = state.to_move;
        [mover, mover.opponent()]
            .into_iter()
            .flat_map(|p| self.legal_actions(state, p).into_iter().map(move |a| (p, a)))
            .collect()
    }
}
