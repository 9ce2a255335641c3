//! Game state: the single source of truth for one match.
//!
//! ## Lifecycle
//!
//! `GameState::new` deals a fresh match in the OPENING phase. From then on
//! only `rules::SiegeRules::apply_action` mutates it. Once `game_over` is set
//! the state is final and can be archived after the result is reported.
//!
//! ## Persistence
//!
//! The whole state is `Serialize + Deserialize`. `to_bytes`/`from_bytes`
//! give the compact bincode form used for snapshots; a decoded snapshot
//! compares equal to the state it was taken from.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::{ActionRecord, LastMove};
use super::config::{ConfigError, RulesConfig};
use super::error::SnapshotError;
use super::player::{Player, PlayerMap};
use super::rng::GameRng;
use crate::board::Coord;
use crate::routes::{fresh_deck, RouteHands};
use crate::tokens::{Ledger, TokenId, TokenRegistry};

/// Turn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Opening,
    Action,
    Reinforce,
    Swap,
    GameOver,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Opening => "OPENING",
            Phase::Action => "ACTION",
            Phase::Reinforce => "REINFORCE",
            Phase::Swap => "SWAP",
            Phase::GameOver => "GAME_OVER",
        };
        f.write_str(name)
    }
}

/// Why a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Loser had no tokens on the board and none in reserve.
    Elimination,
    /// Loser had every on-board token locked and no playable route.
    Siegemate,
    /// Loser conceded.
    Resignation,
    /// Loser's clock ran out.
    Timeout,
}

/// Terminal outcome. Set exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOver {
    pub winner: Player,
    pub reason: GameOverReason,
}

impl GameOver {
    /// The losing side.
    #[must_use]
    pub fn loser(&self) -> Player {
        self.winner.opponent()
    }
}

/// Once-per-turn bookkeeping, cleared at every turn change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnFlags {
    /// Early Reinforcement was bought this turn.
    pub early_reinforcement: bool,
    /// The hand/queue swap already happened (Early Route Swap).
    pub swap_done: bool,
}

/// A token taken during the current turn, and where it stood.
///
/// Evasion may bring such a token back next to this cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub token: TokenId,
    pub at: Coord,
}

/// Per-player counters for post-game summaries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub moves: u32,
    pub invasions: u32,
    pub siege_captures: u32,
    pub placements: u32,
    pub specials: u32,
}

/// Complete state of one match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Rule constants the match was created with.
    pub config: RulesConfig,

    /// Seed the route deck was shuffled with.
    pub seed: u64,

    // === Progression ===
    pub phase: Phase,

    /// Player whose turn (or opening placement) it is.
    pub to_move: Player,

    /// Turn number, 0 during the opening, then from 1.
    pub turn: u32,

    /// Round number; one round is a Wake turn plus a Brake turn.
    pub round: u32,

    // === Material ===
    pub tokens: TokenRegistry,
    pub ledger: Ledger,
    pub routes: RouteHands,

    // === Phase bookkeeping ===
    pub opening_placed: PlayerMap<u16>,

    /// Placements still owed in the current REINFORCE phase.
    pub reinforcements_pending: u16,

    pub flags: TurnFlags,
    pub captured_this_turn: SmallVec<[CaptureRecord; 4]>,

    // === Records ===
    pub last_move: Option<LastMove>,
    pub stats: PlayerMap<MatchStats>,
    pub history: Vector<ActionRecord>,
    pub game_over: Option<GameOver>,
}

impl GameState {
    /// Deal a fresh match: empty board, full reserves, shuffled routes.
    pub fn new(config: RulesConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::deal(config, seed))
    }

    /// Deal without validating; the config must already be known good.
    pub(crate) fn deal(config: RulesConfig, seed: u64) -> Self {
        let deck = fresh_deck(&mut GameRng::new(seed).for_context("deck"));
        let routes = RouteHands::deal(deck, config.hand_size, config.queue_len);
        Self::with_routes(config, seed, routes)
    }

    /// Assemble a state around an already-dealt route layout.
    pub(crate) fn with_routes(config: RulesConfig, seed: u64, routes: RouteHands) -> Self {
        let reserves = config.reserves_per_player;
        Self {
            config,
            seed,
            phase: Phase::Opening,
            to_move: Player::Wake,
            turn: 0,
            round: 0,
            tokens: TokenRegistry::new(reserves),
            ledger: Ledger::new(reserves),
            routes,
            opening_placed: PlayerMap::with_value(0),
            reinforcements_pending: 0,
            flags: TurnFlags::default(),
            captured_this_turn: SmallVec::new(),
            last_move: None,
            stats: PlayerMap::default(),
            history: Vector::new(),
            game_over: None,
        }
    }

    /// Has a terminal outcome been set?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Opening placements a player still owes.
    #[must_use]
    pub fn opening_remaining(&self, player: Player) -> u16 {
        self.config
            .opening_placements
            .saturating_sub(self.opening_placed[player])
    }

    /// Encode as a bincode snapshot.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode a bincode snapshot.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
