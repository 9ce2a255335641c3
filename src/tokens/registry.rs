//! Token registry: every token, its owner, and where it is.
//!
//! All tokens are allocated when the match is created, one per unit of
//! starting reserve. Wake owns ids `0..n`, Brake owns `n..2n`. A token is
//! never removed; it only moves between `Reserve`, the board, a captor's
//! prisoner pool and the void.
//!
//! ## Usage
//!
//! ```
//! use siege_routes::board::Coord;
//! use siege_routes::core::Player;
//! use siege_routes::tokens::{Ledger, TokenLocation, TokenRegistry};
//!
//! let mut ledger = Ledger::new(3);
//! let mut tokens = TokenRegistry::new(3);
//!
//! let id = tokens.first_reserve(Player::Wake).unwrap();
//! tokens.relocate(&mut ledger, id, TokenLocation::OnBoard(Coord::new(1, 1)));
//!
//! assert_eq!(tokens.owner_at(Coord::new(1, 1)), Some(Player::Wake));
//! assert_eq!(ledger.reserves(Player::Wake), 2);
//! ```

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::ledger::Ledger;
use crate::board::{Coord, BOARD_SIZE};
use crate::core::Player;

/// Stable token identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u16);

impl TokenId {
    /// Index into the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

/// Where a token is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenLocation {
    /// Owner's reserve, available for placement.
    Reserve,
    /// On the board.
    OnBoard(Coord),
    /// Prisoner of the given (enemy) player.
    Captive(Player),
    /// Out of play; recoverable only by Ransom.
    Void,
}

impl TokenLocation {
    /// Board cell, if on the board.
    #[must_use]
    pub const fn coord(self) -> Option<Coord> {
        match self {
            TokenLocation::OnBoard(c) => Some(c),
            _ => None,
        }
    }
}

/// A single token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub owner: Player,
    pub location: TokenLocation,
}

/// Per-location totals for one player's tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocationCounts {
    pub reserve: usize,
    pub on_board: usize,
    pub captive: usize,
    pub void: usize,
}

impl LocationCounts {
    /// Sum over all locations.
    #[must_use]
    pub fn total(&self) -> usize {
        self.reserve + self.on_board + self.captive + self.void
    }
}

type Cells = [[Option<TokenId>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// All tokens plus a board occupancy index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistry {
    tokens: Vector<Token>,
    cells: Cells,
}

impl TokenRegistry {
    /// Allocate `per_player` reserve tokens for each side.
    #[must_use]
    pub fn new(per_player: u16) -> Self {
        let tokens = Player::all()
            .flat_map(|owner| {
                let base = owner.index() as u16 * per_player;
                (0..per_player).map(move |i| Token {
                    id: TokenId(base + i),
                    owner,
                    location: TokenLocation::Reserve,
                })
            })
            .collect();

        Self {
            tokens,
            cells: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
        }
    }

    /// Total tokens of both sides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if no tokens were allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Look up a token.
    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.index())
    }

    /// Iterate over every token.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Token id at a cell.
    #[must_use]
    pub fn occupant(&self, c: Coord) -> Option<TokenId> {
        c.index()?;
        self.cells[c.row as usize][c.col as usize]
    }

    /// Token at a cell.
    #[must_use]
    pub fn at(&self, c: Coord) -> Option<&Token> {
        self.occupant(c).and_then(|id| self.get(id))
    }

    /// Owner of the token at a cell.
    #[must_use]
    pub fn owner_at(&self, c: Coord) -> Option<Player> {
        self.at(c).map(|t| t.owner)
    }

    /// On-board and unoccupied.
    #[must_use]
    pub fn is_empty_cell(&self, c: Coord) -> bool {
        c.index().is_some() && self.occupant(c).is_none()
    }

    /// Every empty on-board cell, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        Coord::all().filter(move |c| self.occupant(*c).is_none())
    }

    /// A player's on-board tokens, in id order.
    pub fn on_board(&self, player: Player) -> impl Iterator<Item = &Token> {
        self.tokens
            .iter()
            .filter(move |t| t.owner == player && t.location.coord().is_some())
    }

    /// Number of a player's tokens on the board.
    #[must_use]
    pub fn on_board_count(&self, player: Player) -> usize {
        self.on_board(player).count()
    }

    /// Lowest-id token matching `pred`.
    fn first_where(&self, pred: impl Fn(&Token) -> bool) -> Option<TokenId> {
        self.tokens.iter().find(|t| pred(t)).map(|t| t.id)
    }

    /// Lowest-id reserve token of a player.
    #[must_use]
    pub fn first_reserve(&self, player: Player) -> Option<TokenId> {
        self.first_where(|t| t.owner == player && t.location == TokenLocation::Reserve)
    }

    /// Lowest-id prisoner held by `holder`.
    #[must_use]
    pub fn first_captive_held_by(&self, holder: Player) -> Option<TokenId> {
        self.first_where(|t| t.location == TokenLocation::Captive(holder))
    }

    /// Lowest-id void token owned by a player.
    #[must_use]
    pub fn first_void_of(&self, owner: Player) -> Option<TokenId> {
        self.first_where(|t| t.owner == owner && t.location == TokenLocation::Void)
    }

    /// Where each of a player's tokens is, counted.
    #[must_use]
    pub fn counts(&self, owner: Player) -> LocationCounts {
        let mut counts = LocationCounts::default();
        for token in self.tokens.iter().filter(|t| t.owner == owner) {
            match token.location {
                TokenLocation::Reserve => counts.reserve += 1,
                TokenLocation::OnBoard(_) => counts.on_board += 1,
                TokenLocation::Captive(_) => counts.captive += 1,
                TokenLocation::Void => counts.void += 1,
            }
        }
        counts
    }

    /// Number of prisoners `holder` currently holds.
    #[must_use]
    pub fn held_by(&self, holder: Player) -> usize {
        self.tokens
            .iter()
            .filter(|t| t.location == TokenLocation::Captive(holder))
            .count()
    }

    /// Move a token, keeping the occupancy index and the ledger in step.
    ///
    /// Callers validate first. A board destination must be empty; an unknown
    /// id or occupied destination is logged and ignored. Returns the previous
    /// location on success.
    pub fn relocate(&mut self, ledger: &mut Ledger, id: TokenId, to: TokenLocation) -> Option<TokenLocation> {
        let Some(token) = self.get(id).copied() else {
            error!(%id, "relocate on unknown token");
            debug_assert!(false, "relocate on unknown {id}");
            return None;
        };
        if let TokenLocation::OnBoard(c) = to {
            if !self.is_empty_cell(c) {
                error!(%id, cell = %c, "relocate onto occupied or off-board cell");
                debug_assert!(false, "relocate {id} onto occupied {c}");
                return None;
            }
        }

        if let TokenLocation::OnBoard(from) = token.location {
            self.cells[from.row as usize][from.col as usize] = None;
        }
        if let TokenLocation::OnBoard(c) = to {
            self.cells[c.row as usize][c.col as usize] = Some(id);
        }
        self.tokens.set(id.index(), Token { location: to, ..token });
        ledger.record_transfer(token.owner, token.location, to);
        Some(token.location)
    }

    /// Describe a mismatch between token locations and the occupancy index.
    #[must_use]
    pub fn occupancy_violation(&self) -> Option<String> {
        for c in Coord::all() {
            if let Some(id) = self.occupant(c) {
                match self.get(id) {
                    Some(t) if t.location == TokenLocation::OnBoard(c) => {}
                    _ => return Some(format!("cell {c} indexes {id} which is not there")),
                }
            }
        }
        for token in self.tokens.iter() {
            if let TokenLocation::OnBoard(c) = token.location {
                if self.occupant(c) != Some(token.id) {
                    return Some(format!("{} claims {c} but the cell disagrees", token.id));
                }
            }
        }
        None
    }
}
