//! Route-play legality and the legal-move generator.

use crate::board::{project, Coord};
use crate::core::{ActionError, GameState, MoveKind, Player};
use crate::routes::{RouteCard, RouteId};
use crate::siege::{self, SiegeStatus};
use crate::tokens::TokenId;

/// A validated route play, ready for `execute_route`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoutePlan {
    pub route: RouteCard,
    pub token: TokenId,
    pub from: Coord,
    pub to: Coord,
    pub kind: MoveKind,
    /// Enemy token on the destination, for invasions.
    pub defender: Option<TokenId>,
}

/// Check that `player` may play `route` on `token` right now.
///
/// Phase and turn order are the caller's concern; this covers the card, the
/// token and the destination.
pub fn validate_route(
    state: &GameState,
    player: Player,
    route: RouteId,
    token: TokenId,
) -> Result<RoutePlan, ActionError> {
    if state.routes.is_used(route) {
        return Err(ActionError::RouteAlreadyUsedThisTurn { route });
    }
    if !state.routes.in_hand(player, route) {
        return Err(ActionError::RouteNotInHand { route });
    }
    let card = *route.card().ok_or(ActionError::RouteNotInHand { route })?;

    let moving = state
        .tokens
        .get(token)
        .ok_or(ActionError::UnknownToken { token })?;
    if moving.owner != player {
        return Err(ActionError::NotYourToken { token, player });
    }
    let from = moving
        .location
        .coord()
        .ok_or(ActionError::TokenNotOnBoard { token })?;
    if siege::status_of(&state.tokens, moving).is_some_and(SiegeStatus::is_restricted) {
        return Err(ActionError::TokenLocked { token });
    }

    let to = project(card.direction, card.distance, from)
        .ok_or(ActionError::OutOfBounds { route, from })?;

    let (kind, defender) = match state.tokens.at(to) {
        None => (MoveKind::Relocation, None),
        Some(t) if t.owner == player => return Err(ActionError::OccupiedBySelf { at: to }),
        Some(t) => (MoveKind::Invasion, Some(t.id)),
    };

    Ok(RoutePlan {
        route: card,
        token,
        from,
        to,
        kind,
        defender,
    })
}

/// Every legal (route, token) pair for `player`, hand order then token id.
#[must_use]
pub fn playable_routes(state: &GameState, player: Player) -> Vec<RoutePlan> {
    let mut plans = Vec::new();
    for &route in state.routes.hand(player) {
        for token in state.tokens.on_board(player) {
            if let Ok(plan) = validate_route(state, player, route, token.id) {
                plans.push(plan);
            }
        }
    }
    plans
}

/// Can `player` play any route at all?
#[must_use]
pub fn has_playable_route(state: &GameState, player: Player) -> bool {
    state.routes.hand(player).iter().any(|&route| {
        state
            .tokens
            .on_board(player)
            .any(|token| validate_route(state, player, route, token.id).is_ok())
    })
}
