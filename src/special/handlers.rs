//! The five special-action handlers.
//!
//! Each handler validates everything (phase, actor, once-per limits,
//! target, cost) before it mutates anything, so a rejection leaves the
//! state untouched. Phase transitions that follow are the turn machine's job.

use tracing::debug;

use super::costs::Cost;
use crate::board::Coord;
use crate::core::{ActionError, GameState, LastMove, MoveKind, Phase, Player, SpecialKind};
use crate::moves::has_playable_route;
use crate::routes::RouteId;
use crate::siege::{self, SiegeStatus};
use crate::tokens::{TokenId, TokenLocation};

/// Fail unless it is `player`'s turn and the phase is one of `phases`.
pub(crate) fn require_own_turn(
    state: &GameState,
    player: Player,
    action: &'static str,
    phases: &[Phase],
) -> Result<(), ActionError> {
    if state.to_move != player {
        return Err(ActionError::NotYourTurn { player });
    }
    if !phases.contains(&state.phase) {
        return Err(ActionError::WrongPhase {
            action,
            phase: state.phase,
        });
    }
    Ok(())
}

/// Pay 2 reserves for one extra reinforcement this turn.
///
/// The reserves left after paying must still cover every placement owed
/// this turn, the bought one included.
pub fn early_reinforcement(state: &mut GameState, player: Player) -> Result<(), ActionError> {
    require_own_turn(state, player, "early reinforcement", &[Phase::Action, Phase::Reinforce])?;
    if state.flags.early_reinforcement {
        return Err(ActionError::AlreadyUsed(SpecialKind::EarlyReinforcement));
    }
    let owed = match state.phase {
        Phase::Reinforce => state.reinforcements_pending,
        _ => state.config.reinforcements_per_turn,
    };
    Cost::EARLY_REINFORCEMENT.check(state, player)?;
    Cost {
        reserves: Cost::EARLY_REINFORCEMENT.reserves.saturating_add(owed).saturating_add(1),
        captives: 0,
    }
    .check(state, player)?;

    Cost::EARLY_REINFORCEMENT.pay(state, player);
    state.flags.early_reinforcement = true;
    if state.phase == Phase::Reinforce {
        state.reinforcements_pending += 1;
    }
    state.stats[player].specials += 1;
    debug!(%player, "early reinforcement bought");
    Ok(())
}

/// Pay 2 captives to return one own token from the void to reserve.
pub fn ransom(state: &mut GameState, player: Player) -> Result<TokenId, ActionError> {
    require_own_turn(state, player, "ransom", &[Phase::Action, Phase::Reinforce])?;
    let freed = state
        .tokens
        .first_void_of(player)
        .ok_or(ActionError::NothingToRansom)?;
    Cost::RANSOM.check(state, player)?;

    Cost::RANSOM.pay(state, player);
    state.tokens.relocate(&mut state.ledger, freed, TokenLocation::Reserve);
    state.stats[player].specials += 1;
    debug!(%player, token = %freed, "token ransomed");
    Ok(freed)
}

/// Pay 2 captives to make this turn's hand/queue swap now.
pub fn early_route_swap(
    state: &mut GameState,
    player: Player,
    hand: RouteId,
    queue: RouteId,
) -> Result<(), ActionError> {
    require_own_turn(state, player, "early route swap", &[Phase::Action])?;
    if state.flags.swap_done {
        return Err(ActionError::AlreadyUsed(SpecialKind::EarlyRouteSwap));
    }
    check_swap(state, player, hand, queue)?;
    Cost::EARLY_ROUTE_SWAP.check(state, player)?;

    Cost::EARLY_ROUTE_SWAP.pay(state, player);
    state.routes.swap(player, hand, queue);
    state.flags.swap_done = true;
    state.stats[player].specials += 1;
    debug!(%player, %hand, %queue, "early route swap");
    Ok(())
}

/// Shared hand/queue checks for both swap actions.
pub(crate) fn check_swap(
    state: &GameState,
    player: Player,
    hand: RouteId,
    queue: RouteId,
) -> Result<(), ActionError> {
    if !state.routes.in_hand(player, hand) {
        return Err(ActionError::RouteNotInHand { route: hand });
    }
    if !state.routes.queue().contains(&queue) {
        return Err(ActionError::RouteNotInQueue { route: queue });
    }
    Ok(())
}

/// Once per game, during the opponent's turn, step a token one cell.
///
/// An on-board token that is not locked moves to an empty neighbouring
/// cell. A token the opponent captured this turn may instead escape to an
/// empty cell on or next to where it was taken, undoing that capture.
pub fn evasion(
    state: &mut GameState,
    player: Player,
    token: TokenId,
    to: Coord,
) -> Result<(), ActionError> {
    if state.to_move == player {
        return Err(ActionError::NotOpponentsTurn);
    }
    if !matches!(state.phase, Phase::Action | Phase::Reinforce) {
        return Err(ActionError::WrongPhase {
            action: "evasion",
            phase: state.phase,
        });
    }
    if state.ledger.used_evasion(player) {
        return Err(ActionError::AlreadyUsed(SpecialKind::Evasion));
    }

    let target = *state
        .tokens
        .get(token)
        .ok_or(ActionError::UnknownToken { token })?;
    if target.owner != player {
        return Err(ActionError::NotYourToken { token, player });
    }
    if to.index().is_none() {
        return Err(ActionError::CellOffBoard { at: to });
    }

    let from = match target.location {
        TokenLocation::OnBoard(from) => {
            if siege::status_of(&state.tokens, &target).is_some_and(SiegeStatus::is_restricted) {
                return Err(ActionError::TokenLocked { token });
            }
            if from.king_distance(to) != 1 {
                return Err(ActionError::NotAdjacent { from, to });
            }
            Some(from)
        }
        TokenLocation::Captive(_) => {
            let record = state
                .captured_this_turn
                .iter()
                .find(|r| r.token == token)
                .ok_or(ActionError::TokenNotOnBoard { token })?;
            if record.at.king_distance(to) > 1 {
                return Err(ActionError::NotAdjacent { from: record.at, to });
            }
            None
        }
        TokenLocation::Reserve | TokenLocation::Void => {
            return Err(ActionError::TokenNotOnBoard { token });
        }
    };

    if !state.tokens.is_empty_cell(to) {
        return Err(ActionError::CellOccupied { at: to });
    }
    // The vacated origin is never an enemy cell, so counting in place is exact.
    if siege::classify(siege::enemy_neighbors(&state.tokens, to, player)) == SiegeStatus::FullySieged {
        return Err(ActionError::TokenLocked { token });
    }
    Cost::EVASION.check(state, player)?;

    Cost::EVASION.pay(state, player);
    state.tokens.relocate(&mut state.ledger, token, TokenLocation::OnBoard(to));
    state.captured_this_turn.retain(|r| r.token != token);
    state.ledger.mark_evasion_used(player);
    state.stats[player].specials += 1;
    state.last_move = Some(LastMove {
        player,
        token,
        from,
        to,
        kind: MoveKind::Evasion,
        captured: Default::default(),
        turn: state.turn,
    });
    debug!(%player, %token, %to, rescued = from.is_none(), "evasion");
    Ok(())
}

/// Give up the whole hand when no route can be played.
pub fn forced_yield(state: &mut GameState, player: Player) -> Result<(), ActionError> {
    require_own_turn(state, player, "forced yield", &[Phase::Action])?;
    if has_playable_route(state, player) {
        return Err(ActionError::YieldNotAllowed);
    }

    state.routes.yield_hand(player);
    debug!(%player, "hand yielded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Resource, RulesConfig};
    use crate::rules::{PositionBuilder, RulesEngine, SiegeRules};

    const N1: RouteId = RouteId(0);
    const N2: RouteId = RouteId(1);
    const E1: RouteId = RouteId(6);
    const S1: RouteId = RouteId(12);

    fn c(col: i8, row: i8) -> Coord {
        Coord::new(col, row)
    }

    fn base() -> PositionBuilder {
        PositionBuilder::new(RulesConfig::default(), 1)
            .place(Player::Wake, c(2, 2))
            .place(Player::Brake, c(4, 4))
            .hand(Player::Wake, &[N1, E1, S1])
    }

    #[test]
    fn test_early_reinforcement_once_per_turn() {
        let mut state = base().build();

        early_reinforcement(&mut state, Player::Wake).unwrap();
        assert_eq!(state.ledger.reserves(Player::Wake), 15);
        assert_eq!(state.ledger.void_count(), 2);

        let before = state.clone();
        assert_eq!(
            early_reinforcement(&mut state, Player::Wake),
            Err(ActionError::AlreadyUsed(SpecialKind::EarlyReinforcement))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_early_reinforcement_needs_reserves() {
        let config = RulesConfig::default().with_reserves(2).with_opening_placements(1);
        let mut state = PositionBuilder::new(config, 1)
            .place(Player::Wake, c(2, 2))
            .place(Player::Brake, c(4, 4))
            .build();

        assert_eq!(
            early_reinforcement(&mut state, Player::Wake),
            Err(ActionError::InsufficientResources {
                resource: Resource::Reserves,
                needed: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_early_reinforcement_must_be_placeable() {
        let config = RulesConfig::default().with_reserves(4).with_opening_placements(1);
        let rules = SiegeRules::new(config.clone()).unwrap();
        let mut state = PositionBuilder::new(config, 1)
            .place(Player::Wake, c(2, 2))
            .place(Player::Brake, c(4, 4))
            .hand(Player::Wake, &[N1, E1, S1])
            .build();
        assert_eq!(state.ledger.reserves(Player::Wake), 3);
        let before = state.clone();

        // Two reserves paid would leave one for two placements.
        assert_eq!(
            early_reinforcement(&mut state, Player::Wake),
            Err(ActionError::InsufficientResources {
                resource: Resource::Reserves,
                needed: 4,
                available: 3,
            })
        );
        assert_eq!(state, before);
        assert!(!rules
            .legal_actions(&state, Player::Wake)
            .contains(&Action::EarlyReinforcement));
    }

    #[test]
    fn test_early_reinforcement_doubles_pending() {
        let rules = SiegeRules::default();
        let mut state = base().build();
        let token = state.tokens.occupant(c(2, 2)).unwrap();

        rules.apply_action(&mut state, Player::Wake, &Action::EarlyReinforcement).unwrap();
        rules.apply_action(&mut state, Player::Wake, &Action::PlayRoute { route: N1, token }).unwrap();

        assert_eq!(state.phase, Phase::Reinforce);
        assert_eq!(state.reinforcements_pending, 2);
    }

    #[test]
    fn test_ransom_returns_void_token() {
        let mut state = base()
            .void(Player::Wake)
            .captive(Player::Brake, Player::Wake)
            .captive(Player::Brake, Player::Wake)
            .build();
        let voided = state.tokens.first_void_of(Player::Wake).unwrap();

        let freed = ransom(&mut state, Player::Wake).unwrap();

        assert_eq!(freed, voided);
        assert_eq!(state.tokens.get(freed).unwrap().location, TokenLocation::Reserve);
        assert_eq!(state.ledger.captives(Player::Wake), 0);
        assert_eq!(state.ledger.reserves(Player::Wake), 17);
        // One Wake token left the void, two Brake captives entered it.
        assert_eq!(state.ledger.void_count(), 2);
    }

    #[test]
    fn test_ransom_preconditions() {
        let mut state = base().captive(Player::Brake, Player::Wake).build();
        assert_eq!(ransom(&mut state, Player::Wake), Err(ActionError::NothingToRansom));

        let mut state = base().void(Player::Wake).captive(Player::Brake, Player::Wake).build();
        assert_eq!(
            ransom(&mut state, Player::Wake),
            Err(ActionError::InsufficientResources {
                resource: Resource::Captives,
                needed: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_early_route_swap_wrong_cards() {
        let mut state = base()
            .captive(Player::Brake, Player::Wake)
            .captive(Player::Brake, Player::Wake)
            .build();
        let queued = state.routes.queue()[0];
        let deck_card = state.routes.deck()[0];

        assert_eq!(
            early_route_swap(&mut state, Player::Wake, queued, queued),
            Err(ActionError::RouteNotInHand { route: queued })
        );
        assert_eq!(
            early_route_swap(&mut state, Player::Wake, N1, deck_card),
            Err(ActionError::RouteNotInQueue { route: deck_card })
        );

        early_route_swap(&mut state, Player::Wake, N1, queued).unwrap();
        assert_eq!(
            early_route_swap(&mut state, Player::Wake, E1, N1),
            Err(ActionError::AlreadyUsed(SpecialKind::EarlyRouteSwap))
        );
    }

    #[test]
    fn test_evasion_once_per_game() {
        let mut state = base()
            .captive(Player::Brake, Player::Wake)
            .captive(Player::Brake, Player::Wake)
            .to_move(Player::Brake)
            .build();
        let token = state.tokens.occupant(c(2, 2)).unwrap();

        evasion(&mut state, Player::Wake, token, c(1, 1)).unwrap();
        assert_eq!(state.tokens.occupant(c(1, 1)), Some(token));
        assert!(state.ledger.used_evasion(Player::Wake));
        assert_eq!(state.last_move.as_ref().unwrap().kind, MoveKind::Evasion);

        assert_eq!(
            evasion(&mut state, Player::Wake, token, c(1, 2)),
            Err(ActionError::AlreadyUsed(SpecialKind::Evasion))
        );
    }

    #[test]
    fn test_evasion_rules() {
        let mut state = base().captive(Player::Brake, Player::Wake).build();
        let token = state.tokens.occupant(c(2, 2)).unwrap();
        assert_eq!(
            evasion(&mut state, Player::Wake, token, c(1, 1)),
            Err(ActionError::NotOpponentsTurn)
        );

        let mut state = base()
            .captive(Player::Brake, Player::Wake)
            .to_move(Player::Brake)
            .build();
        assert_eq!(
            evasion(&mut state, Player::Wake, token, c(4, 4)),
            Err(ActionError::NotAdjacent { from: c(2, 2), to: c(4, 4) })
        );

        let mut state = base().to_move(Player::Brake).build();
        assert_eq!(
            evasion(&mut state, Player::Wake, token, c(1, 1)),
            Err(ActionError::InsufficientResources {
                resource: Resource::Captives,
                needed: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn test_locked_token_cannot_evade() {
        let mut state = base()
            .place(Player::Brake, c(1, 1))
            .place(Player::Brake, c(2, 1))
            .place(Player::Brake, c(3, 1))
            .place(Player::Brake, c(1, 2))
            .captive(Player::Brake, Player::Wake)
            .to_move(Player::Brake)
            .build();
        let token = state.tokens.occupant(c(2, 2)).unwrap();

        assert_eq!(
            evasion(&mut state, Player::Wake, token, c(2, 3)),
            Err(ActionError::TokenLocked { token })
        );
    }

    #[test]
    fn test_evasion_rescues_captured_token() {
        let rules = SiegeRules::default();
        let mut state = PositionBuilder::new(RulesConfig::default(), 1)
            .place(Player::Wake, c(2, 2))
            .place(Player::Brake, c(2, 3))
            .captive(Player::Brake, Player::Wake)
            .hand(Player::Brake, &[N1, E1, S1])
            .to_move(Player::Brake)
            .build();
        let taken = state.tokens.occupant(c(2, 2)).unwrap();
        let invader = state.tokens.occupant(c(2, 3)).unwrap();

        rules
            .apply_action(&mut state, Player::Brake, &Action::PlayRoute { route: N1, token: invader })
            .unwrap();
        assert_eq!(state.ledger.captives(Player::Brake), 1);

        assert_eq!(
            rules.apply_action(&mut state, Player::Wake, &Action::Evasion { token: taken, to: c(2, 2) }),
            Err(ActionError::CellOccupied { at: c(2, 2) })
        );
        assert_eq!(
            rules.apply_action(&mut state, Player::Wake, &Action::Evasion { token: taken, to: c(4, 4) }),
            Err(ActionError::NotAdjacent { from: c(2, 2), to: c(4, 4) })
        );
        rules
            .apply_action(&mut state, Player::Wake, &Action::Evasion { token: taken, to: c(1, 2) })
            .unwrap();

        assert_eq!(state.tokens.occupant(c(1, 2)), Some(taken));
        assert_eq!(state.ledger.captives(Player::Brake), 0);
        assert!(state.captured_this_turn.is_empty());
        assert_eq!(state.last_move.as_ref().unwrap().from, None);
    }

    #[test]
    fn test_rescue_into_full_siege_rejected() {
        let rules = SiegeRules::default();
        let mut builder = PositionBuilder::new(RulesConfig::default(), 1).place(Player::Wake, c(2, 2));
        for (col, row) in [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3)] {
            builder = builder.place(Player::Brake, c(col, row));
        }
        let mut state = builder
            .place(Player::Brake, c(3, 5))
            .captive(Player::Brake, Player::Wake)
            .hand(Player::Brake, &[N1, N2, S1])
            .to_move(Player::Brake)
            .build();
        let taken = state.tokens.occupant(c(2, 2)).unwrap();
        let closer = state.tokens.occupant(c(3, 5)).unwrap();

        rules
            .apply_action(&mut state, Player::Brake, &Action::PlayRoute { route: N2, token: closer })
            .unwrap();
        assert_eq!(state.tokens.get(taken).unwrap().location, TokenLocation::Captive(Player::Brake));
        let before = state.clone();

        assert_eq!(
            rules.apply_action(&mut state, Player::Wake, &Action::Evasion { token: taken, to: c(2, 2) }),
            Err(ActionError::TokenLocked { token: taken })
        );
        assert_eq!(state, before);
        assert!(!state.ledger.used_evasion(Player::Wake));
    }

    #[test]
    fn test_evasion_far_off_board_target() {
        let mut state = base()
            .captive(Player::Brake, Player::Wake)
            .to_move(Player::Brake)
            .build();
        let token = state.tokens.occupant(c(2, 2)).unwrap();
        let before = state.clone();

        for to in [Coord::new(-128, 2), Coord::new(2, 127), Coord::new(6, 2)] {
            assert_eq!(
                evasion(&mut state, Player::Wake, token, to),
                Err(ActionError::CellOffBoard { at: to })
            );
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_forced_yield() {
        let mut state = base().build();
        assert_eq!(forced_yield(&mut state, Player::Wake), Err(ActionError::YieldNotAllowed));

        let mut state = PositionBuilder::new(RulesConfig::default(), 1)
            .place(Player::Brake, c(4, 4))
            .hand(Player::Wake, &[N1, E1, S1])
            .build();
        forced_yield(&mut state, Player::Wake).unwrap();

        assert!(state.routes.hand(Player::Wake).is_empty());
        assert_eq!(state.routes.used(), &[N1, E1, S1]);
        assert_eq!(state.routes.partition_violation(), None);
    }
}
