//! Core engine types: players, RNG, configuration, actions, errors, state.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;
pub mod state;

pub use player::{Player, PlayerMap};
pub use rng::GameRng;
pub use config::{ConfigError, RulesConfig};
pub use action::{Action, ActionRecord, LastMove, MoveKind};
pub use error::{ActionError, Resource, SnapshotError, SpecialKind};
pub use state::{CaptureRecord, GameOver, GameOverReason, GameState, MatchStats, Phase, TurnFlags};
