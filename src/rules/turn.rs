//! `SiegeRules`: the turn/phase state machine.
//!
//! ## Flow
//!
//! ```text
//! OPENING ──(all opening placements)──► ACTION ─► REINFORCE ─► SWAP ─┐
//!                                         ▲                          │
//!                                         └──── other player ◄───────┘
//! ```
//!
//! After every accepted action the machine settles: elimination is checked,
//! the REINFORCE allowance is clipped to what can actually be placed, a SWAP
//! already taken by Early Route Swap runs on its own, and a player entering
//! ACTION is checked for siegemate.

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::engine::{RulesEngine, Transition};
use super::invariants::check_invariants;
use crate::board::{neighbors8, Coord};
use crate::core::{
    Action, ActionError, ActionRecord, ConfigError, GameOver, GameOverReason, GameState, LastMove,
    MoveKind, Phase, Player, Resource, RulesConfig, TurnFlags,
};
use crate::moves::{execute_route, has_playable_route, playable_routes, validate_route};
use crate::siege;
use crate::special::handlers::{check_swap, require_own_turn};
use crate::special::{early_reinforcement, early_route_swap, evasion, forced_yield, ransom};
use crate::tokens::TokenLocation;

/// A recorded action that the rules refused during replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("replay stopped at record {index}: {error}")]
pub struct ReplayError {
    /// Position of the offending record.
    pub index: usize,
    pub error: ActionError,
}

/// The siege-routes rules.
#[derive(Clone, Debug, Default)]
pub struct SiegeRules {
    config: RulesConfig,
}

impl SiegeRules {
    /// Rules with a validated config.
    pub fn new(config: RulesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Rebuild a match from its seed and accepted actions.
    pub fn replay(&self, seed: u64, records: &[ActionRecord]) -> Result<GameState, ReplayError> {
        let mut state = self.new_game(seed);
        for (index, record) in records.iter().enumerate() {
            self.try_apply(&mut state, record.player, &record.action)
                .map_err(|error| ReplayError { index, error })?;
        }
        Ok(state)
    }

    /// Apply without logging rejections or auditing. Used for replay and
    /// for filtering candidate actions.
    fn try_apply(
        &self,
        state: &mut GameState,
        player: Player,
        action: &Action,
    ) -> Result<Transition, ActionError> {
        if state.is_over() {
            return Err(ActionError::GameAlreadyOver);
        }

        let turn = state.turn;
        self.dispatch(state, player, action)?;

        let sequence = state.history.len() as u32;
        state
            .history
            .push_back(ActionRecord::new(player, action.clone(), turn, sequence));

        if !action.is_meta() {
            self.settle(state, player);
        }

        Ok(Transition {
            phase: state.phase,
            to_move: state.to_move,
            game_over: state.game_over,
        })
    }

    fn dispatch(&self, state: &mut GameState, player: Player, action: &Action) -> Result<(), ActionError> {
        match *action {
            Action::Place { at } => place(state, player, at),
            Action::PlayRoute { route, token } => {
                require_own_turn(state, player, "play route", &[Phase::Action])?;
                let plan = validate_route(state, player, route, token)?;
                execute_route(state, player, &plan);
                enter_reinforce(state);
                Ok(())
            }
            Action::ForcedYield => {
                forced_yield(state, player)?;
                enter_reinforce(state);
                Ok(())
            }
            Action::EarlyReinforcement => early_reinforcement(state, player),
            Action::Ransom => ransom(state, player).map(|_| ()),
            Action::EarlyRouteSwap { hand, queue } => early_route_swap(state, player, hand, queue),
            Action::Evasion { token, to } => evasion(state, player, token, to),
            Action::SwapRoute { hand, queue } => {
                require_own_turn(state, player, "swap route", &[Phase::Swap])?;
                check_swap(state, player, hand, queue)?;
                state.routes.swap(player, hand, queue);
                state.flags.swap_done = true;
                debug!(%player, %hand, %queue, "route swapped");
                end_turn(state);
                Ok(())
            }
            Action::SkipSwap => {
                require_own_turn(state, player, "skip swap", &[Phase::Swap])?;
                end_turn(state);
                Ok(())
            }
            Action::Resign => {
                finish(state, GameOver {
                    winner: player.opponent(),
                    reason: GameOverReason::Resignation,
                });
                Ok(())
            }
            Action::Timeout { flagged } => {
                // Submitted on behalf of the player whose clock ran out.
                if player != flagged {
                    return Err(ActionError::ForeignTimeout { player, flagged });
                }
                finish(state, GameOver {
                    winner: flagged.opponent(),
                    reason: GameOverReason::Timeout,
                });
                Ok(())
            }
        }
    }

    /// Run the automatic follow-ups of an accepted action.
    fn settle(&self, state: &mut GameState, actor: Player) {
        if state.phase == Phase::Opening {
            return;
        }
        loop {
            if state.is_over() {
                return;
            }
            if let Some(over) = elimination(state, actor) {
                finish(state, over);
                return;
            }
            match state.phase {
                Phase::Reinforce => {
                    let placeable = state
                        .ledger
                        .reserves(state.to_move)
                        .min(state.tokens.empty_cells().count() as u16);
                    state.reinforcements_pending = state.reinforcements_pending.min(placeable);
                    if state.reinforcements_pending == 0 {
                        state.phase = Phase::Swap;
                        debug!(player = %state.to_move, "reinforce done");
                        continue;
                    }
                }
                Phase::Swap if state.flags.swap_done => {
                    end_turn(state);
                    continue;
                }
                _ => {}
            }
            return;
        }
    }

    /// Every candidate `player` could submit now, before filtering.
    fn candidates(&self, state: &GameState, player: Player) -> Vec<Action> {
        let mut out = Vec::new();

        if state.to_move != player {
            if matches!(state.phase, Phase::Action | Phase::Reinforce) {
                evasion_candidates(state, player, &mut out);
            }
            return out;
        }

        let hand = state.routes.hand(player);
        let queue = state.routes.queue();
        match state.phase {
            Phase::Opening | Phase::Reinforce => {
                if state.ledger.reserves(player) > 0 {
                    out.extend(state.tokens.empty_cells().map(|at| Action::Place { at }));
                }
                if state.phase == Phase::Reinforce {
                    out.push(Action::EarlyReinforcement);
                    out.push(Action::Ransom);
                }
            }
            Phase::Action => {
                let plans = playable_routes(state, player);
                if plans.is_empty() {
                    out.push(Action::ForcedYield);
                }
                out.extend(plans.iter().map(|p| Action::PlayRoute {
                    route: p.route.id,
                    token: p.token,
                }));
                out.push(Action::EarlyReinforcement);
                out.push(Action::Ransom);
                for &h in hand {
                    out.extend(queue.iter().map(|&q| Action::EarlyRouteSwap { hand: h, queue: q }));
                }
            }
            Phase::Swap => {
                for &h in hand {
                    out.extend(queue.iter().map(|&q| Action::SwapRoute { hand: h, queue: q }));
                }
                out.push(Action::SkipSwap);
            }
            Phase::GameOver => {}
        }
        out
    }

    fn audit(&self, state: &GameState) {
        let violations = check_invariants(state);
        for violation in &violations {
            error!(%violation, turn = state.turn, "invariant violated");
        }
        debug_assert!(violations.is_empty(), "invariants violated: {violations:?}");
    }
}

impl RulesEngine for SiegeRules {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn new_game(&self, seed: u64) -> GameState {
        let state = GameState::deal(self.config.clone(), seed);
        debug!(seed, "new match dealt");
        state
    }

    fn legal_actions(&self, state: &GameState, player: Player) -> Vec<Action> {
        if state.is_over() {
            return Vec::new();
        }
        self.candidates(state, player)
            .into_iter()
            .filter(|action| self.try_apply(&mut state.clone(), player, action).is_ok())
            .collect()
    }

    fn apply_action(
        &self,
        state: &mut GameState,
        player: Player,
        action: &Action,
    ) -> Result<Transition, ActionError> {
        match self.try_apply(state, player, action) {
            Ok(transition) => {
                debug!(
                    %player,
                    action = action.name(),
                    phase = %transition.phase,
                    to_move = %transition.to_move,
                    "action applied"
                );
                self.audit(state);
                Ok(transition)
            }
            Err(err) => {
                warn!(%player, action = action.name(), error = %err, "action rejected");
                Err(err)
            }
        }
    }
}

/// Opening or REINFORCE placement of the lowest-id reserve token.
fn place(state: &mut GameState, player: Player, at: Coord) -> Result<(), ActionError> {
    require_own_turn(state, player, "place", &[Phase::Opening, Phase::Reinforce])?;
    if at.index().is_none() {
        return Err(ActionError::CellOffBoard { at });
    }
    if !state.tokens.is_empty_cell(at) {
        return Err(ActionError::CellOccupied { at });
    }
    let token = state
        .tokens
        .first_reserve(player)
        .ok_or(ActionError::InsufficientResources {
            resource: Resource::Reserves,
            needed: 1,
            available: 0,
        })?;

    state.tokens.relocate(&mut state.ledger, token, TokenLocation::OnBoard(at));
    state.stats[player].placements += 1;
    state.last_move = Some(LastMove {
        player,
        token,
        from: None,
        to: at,
        kind: MoveKind::Placement,
        captured: Default::default(),
        turn: state.turn,
    });
    debug!(%player, %token, %at, phase = %state.phase, "token placed");

    if state.phase == Phase::Opening {
        state.opening_placed[player] += 1;
        let next = player.opponent();
        if state.opening_remaining(next) > 0 {
            state.to_move = next;
        } else if state.opening_remaining(player) == 0 {
            info!("opening complete");
            state.turn = 1;
            state.round = 1;
            start_turn(state, Player::Wake);
        }
    } else {
        state.reinforcements_pending = state.reinforcements_pending.saturating_sub(1);
    }
    Ok(())
}

fn enter_reinforce(state: &mut GameState) {
    state.phase = Phase::Reinforce;
    state.reinforcements_pending =
        state.config.reinforcements_per_turn + u16::from(state.flags.early_reinforcement);
}

/// Cycle the mover's routes and hand the turn over.
fn end_turn(state: &mut GameState) {
    let player = state.to_move;
    let drawn = state.routes.cycle(player);
    state.flags = TurnFlags::default();
    state.captured_this_turn.clear();
    state.reinforcements_pending = 0;
    state.turn += 1;
    state.round = (state.turn + 1) / 2;
    debug!(%player, drawn = drawn.len(), turn = state.turn, "turn ended");
    start_turn(state, player.opponent());
}

/// Enter ACTION for `player`, ending the match on siegemate.
fn start_turn(state: &mut GameState, player: Player) {
    state.phase = Phase::Action;
    state.to_move = player;
    if is_siegemated(state, player) {
        finish(state, GameOver {
            winner: player.opponent(),
            reason: GameOverReason::Siegemate,
        });
    }
}

/// At least one token on the board, all of them locked, nothing playable.
#[must_use]
pub fn is_siegemated(state: &GameState, player: Player) -> bool {
    state.tokens.on_board_count(player) > 0
        && siege::all_restricted(&state.tokens, player)
        && !has_playable_route(state, player)
}

/// No tokens on the board and none in reserve.
#[must_use]
pub fn is_eliminated(state: &GameState, player: Player) -> bool {
    state.tokens.on_board_count(player) == 0 && state.ledger.reserves(player) == 0
}

fn elimination(state: &GameState, actor: Player) -> Option<GameOver> {
    [actor.opponent(), actor]
        .into_iter()
        .find(|&p| is_eliminated(state, p))
        .map(|loser| GameOver {
            winner: loser.opponent(),
            reason: GameOverReason::Elimination,
        })
}

fn finish(state: &mut GameState, over: GameOver) {
    state.phase = Phase::GameOver;
    state.game_over = Some(over);
    state.reinforcements_pending = 0;
    info!(
        winner = %over.winner,
        reason = ?over.reason,
        turn = state.turn,
        round = state.round,
        "game over"
    );
}

fn evasion_candidates(state: &GameState, player: Player, out: &mut Vec<Action>) {
    if state.ledger.used_evasion(player) {
        return;
    }
    for token in state.tokens.on_board(player) {
        if let Some(from) = token.location.coord() {
            out.extend(neighbors8(from).into_iter().map(|to| Action::Evasion { token: token.id, to }));
        }
    }
    for record in &state.captured_this_turn {
        let owned = state.tokens.get(record.token).is_some_and(|t| t.owner == player);
        if owned {
            out.push(Action::Evasion { token: record.token, to: record.at });
            out.extend(
                neighbors8(record.at)
                    .into_iter()
                    .map(|to| Action::Evasion { token: record.token, to }),
            );
        }
    }
}
