//! Build mid-game positions directly, skipping the opening.
//!
//! Used by tests and puzzle setups. The result is a consistent ACTION-phase
//! state for turn 1: tokens are moved with the same registry calls the
//! engine uses, so ledger and registry agree.

use crate::board::Coord;
use crate::core::{GameState, Phase, Player, PlayerMap, RulesConfig};
use crate::routes::{RouteHands, RouteId, CATALOG_SIZE};
use crate::tokens::TokenLocation;

/// Builder for a position.
///
/// Requested hands are dealt first; the rest of the deck follows in
/// catalog order.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    config: RulesConfig,
    seed: u64,
    placements: Vec<(Player, Coord)>,
    captives: Vec<(Player, Player)>,
    voids: Vec<Player>,
    hands: PlayerMap<Vec<RouteId>>,
    to_move: Player,
}

impl PositionBuilder {
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            placements: Vec::new(),
            captives: Vec::new(),
            voids: Vec::new(),
            hands: PlayerMap::default(),
            to_move: Player::Wake,
        }
    }

    /// Put one of `player`'s reserve tokens on `at`.
    pub fn place(mut self, player: Player, at: Coord) -> Self {
        self.placements.push((player, at));
        self
    }

    /// Make one of `owner`'s reserve tokens a prisoner of `holder`.
    pub fn captive(mut self, owner: Player, holder: Player) -> Self {
        self.captives.push((owner, holder));
        self
    }

    /// Send one of `owner`'s reserve tokens to the void.
    pub fn void(mut self, owner: Player) -> Self {
        self.voids.push(owner);
        self
    }

    /// Cards the player's hand starts with (topped up from the deck).
    pub fn hand(mut self, player: Player, routes: &[RouteId]) -> Self {
        self.hands[player] = routes.to_vec();
        self
    }

    pub fn to_move(mut self, player: Player) -> Self {
        self.to_move = player;
        self
    }

    /// Assemble the state. Requests that cannot be met (no reserve left,
    /// occupied cell) are skipped.
    pub fn build(self) -> GameState {
        let mut deck: Vec<RouteId> = Vec::with_capacity(CATALOG_SIZE);
        let wanted: Vec<RouteId> = Player::all().flat_map(|p| self.hands[p].clone()).collect();
        let mut rest = (0..CATALOG_SIZE as u8)
            .map(RouteId::new)
            .filter(|r| !wanted.contains(r));

        for player in Player::all() {
            let requested = &self.hands[player];
            deck.extend(requested.iter().take(self.config.hand_size).copied());
            for _ in requested.len()..self.config.hand_size {
                deck.extend(rest.next());
            }
        }
        deck.extend(rest);

        let routes = RouteHands::deal(deck, self.config.hand_size, self.config.queue_len);
        let mut state = GameState::with_routes(self.config, self.seed, routes);

        for (player, at) in self.placements {
            if let Some(id) = state.tokens.first_reserve(player) {
                if state.tokens.is_empty_cell(at) {
                    state.tokens.relocate(&mut state.ledger, id, TokenLocation::OnBoard(at));
                }
            }
        }
        for (owner, holder) in self.captives {
            if let Some(id) = state.tokens.first_reserve(owner) {
                state.tokens.relocate(&mut state.ledger, id, TokenLocation::Captive(holder));
            }
        }
        for owner in self.voids {
            if let Some(id) = state.tokens.first_reserve(owner) {
                state.tokens.relocate(&mut state.ledger, id, TokenLocation::Void);
            }
        }

        state.opening_placed = PlayerMap::with_value(state.config.opening_placements);
        state.phase = Phase::Action;
        state.to_move = self.to_move;
        state.turn = 1;
        state.round = 1;
        state
    }
}
