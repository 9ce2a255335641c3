//! Route-play execution: relocation, invasion, and the siege pass.

use smallvec::SmallVec;
use tracing::debug;

use super::validator::RoutePlan;
use crate::board::Coord;
use crate::core::{CaptureRecord, GameState, LastMove, Player};
use crate::siege;
use crate::tokens::{TokenId, TokenLocation};

/// What a route play changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Defender taken by invasion.
    pub invaded: Option<TokenId>,
    /// Enemy tokens captured by the siege pass.
    pub sieged: SmallVec<[TokenId; 4]>,
}

impl MoveOutcome {
    /// Invaded defender first, then siege captures.
    #[must_use]
    pub fn all_captured(&self) -> SmallVec<[TokenId; 4]> {
        self.invaded.into_iter().chain(self.sieged.iter().copied()).collect()
    }
}

/// Apply a validated plan.
///
/// The invaded defender becomes the mover's captive. Then one siege pass
/// runs over enemy tokens on or next to the destination and the vacated
/// origin; each one at 8/8 is captured too. There is no second pass.
pub fn execute_route(state: &mut GameState, player: Player, plan: &RoutePlan) -> MoveOutcome {
    let mut outcome = MoveOutcome::default();

    state.routes.consume(player, plan.route.id);

    if let Some(defender) = plan.defender {
        capture(state, player, defender, plan.to);
        outcome.invaded = Some(defender);
        state.stats[player].invasions += 1;
    }

    state
        .tokens
        .relocate(&mut state.ledger, plan.token, TokenLocation::OnBoard(plan.to));
    state.stats[player].moves += 1;

    let victims = siege::fully_sieged_near(&state.tokens, &[plan.to, plan.from], player.opponent());
    for victim in victims {
        if let Some(at) = state.tokens.get(victim).and_then(|t| t.location.coord()) {
            capture(state, player, victim, at);
            outcome.sieged.push(victim);
            state.stats[player].siege_captures += 1;
        }
    }

    debug!(
        %player,
        route = %plan.route,
        from = %plan.from,
        to = %plan.to,
        invaded = outcome.invaded.is_some(),
        sieged = outcome.sieged.len(),
        "route played"
    );

    state.last_move = Some(LastMove {
        player,
        token: plan.token,
        from: Some(plan.from),
        to: plan.to,
        kind: plan.kind,
        captured: outcome.all_captured(),
        turn: state.turn,
    });

    outcome
}

fn capture(state: &mut GameState, captor: Player, victim: TokenId, at: Coord) {
    state
        .tokens
        .relocate(&mut state.ledger, victim, TokenLocation::Captive(captor));
    state.captured_this_turn.push(CaptureRecord { token: victim, at });
}
