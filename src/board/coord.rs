//! Coordinates and compass directions on the 6×6 grid.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Width and height of the playable grid.
pub const BOARD_SIZE: i8 = 6;

/// Number of intersections on the grid.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// An intersection on the grid. `row` 0 is the north edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column, 0 = west edge.
    pub col: i8,
    /// Row, 0 = north edge.
    pub row: i8,
}

impl Coord {
    /// Create a coordinate. The result may be off-board; check with `in_bounds`.
    #[must_use]
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// All 36 on-board coordinates, row-major from the north-west corner.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Coord::new(col, row)))
    }

    /// Offset by a delta, or `None` if a component overflows `i8`.
    #[must_use]
    pub fn offset(self, d_col: i8, d_row: i8) -> Option<Self> {
        Some(Self::new(self.col.checked_add(d_col)?, self.row.checked_add(d_row)?))
    }

    /// Row-major cell index, or `None` off-board.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        if in_bounds(self) {
            Some(self.row as usize * BOARD_SIZE as usize + self.col as usize)
        } else {
            None
        }
    }

    /// Chebyshev (king-move) distance. Defined for any pair, on-board or not.
    #[must_use]
    pub fn king_distance(self, other: Coord) -> i16 {
        let d_col = i16::from(self.col) - i16::from(other.col);
        let d_row = i16::from(self.row) - i16::from(other.row);
        d_col.abs().max(d_row.abs())
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Columns a-f, rows 1-6 from the north edge. Off-board cells print raw.
        if !in_bounds(*self) {
            return write!(f, "({}, {})", self.col, self.row);
        }
        let file = char::from(b'a' + self.col as u8);
        write!(f, "{}{}", file, i16::from(self.row) + 1)
    }
}

/// The eight compass directions a route can point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Unit step as (column delta, row delta).
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// True for N, E, S, W.
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    /// Longest route distance allowed in this direction.
    #[must_use]
    pub const fn max_distance(self) -> u8 {
        if self.is_orthogonal() {
            4
        } else {
            3
        }
    }

    /// Short compass label (N, NE, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        }
    }
}

/// Is the coordinate on the 6×6 grid?
#[must_use]
pub const fn in_bounds(c: Coord) -> bool {
    c.col >= 0 && c.col < BOARD_SIZE && c.row >= 0 && c.row < BOARD_SIZE
}

/// The on-board king-move neighbours of `c` (3 in a corner, 5 on an edge, 8 inside).
#[must_use]
pub fn neighbors8(c: Coord) -> SmallVec<[Coord; 8]> {
    Direction::ALL
        .iter()
        .filter_map(|dir| {
            let (dc, dr) = dir.delta();
            c.offset(dc, dr)
        })
        .filter(|n| in_bounds(*n))
        .collect()
}

/// The cell `dist` steps from `from` in `dir`, or `None` if it leaves the grid.
///
/// Routes jump: intermediate cells are not inspected.
#[must_use]
pub fn project(dir: Direction, dist: u8, from: Coord) -> Option<Coord> {
    let (dc, dr) = dir.delta();
    let steps = i8::try_from(dist).ok()?;
    let to = from.offset(dc.checked_mul(steps)?, dr.checked_mul(steps)?)?;
    in_bounds(to).then_some(to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        assert!(in_bounds(Coord::new(0, 0)));
        assert!(in_bounds(Coord::new(5, 5)));
        assert!(!in_bounds(Coord::new(6, 0)));
        assert!(!in_bounds(Coord::new(0, -1)));
    }

    #[test]
    fn test_all_cells() {
        let cells: Vec<_> = Coord::all().collect();
        assert_eq!(cells.len(), CELL_COUNT);
        assert_eq!(cells[0], Coord::new(0, 0));
        assert_eq!(cells[7], Coord::new(1, 1));
        assert!(cells.iter().all(|c| in_bounds(*c)));
    }

    #[test]
    fn test_neighbor_counts() {
        assert_eq!(neighbors8(Coord::new(0, 0)).len(), 3);
        assert_eq!(neighbors8(Coord::new(3, 0)).len(), 5);
        assert_eq!(neighbors8(Coord::new(2, 3)).len(), 8);
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Coord::new(2, 2);
        for n in neighbors8(center) {
            assert_eq!(center.king_distance(n), 1);
        }
    }

    #[test]
    fn test_project() {
        let from = Coord::new(1, 4);
        assert_eq!(project(Direction::North, 4, from), Some(Coord::new(1, 0)));
        assert_eq!(project(Direction::NorthEast, 3, from), Some(Coord::new(4, 1)));
        assert_eq!(project(Direction::West, 1, from), Some(Coord::new(0, 4)));
        assert_eq!(project(Direction::West, 2, from), None);
        assert_eq!(project(Direction::South, 2, from), None);
    }

    #[test]
    fn test_direction_limits() {
        assert_eq!(Direction::East.max_distance(), 4);
        assert_eq!(Direction::SouthWest.max_distance(), 3);
        assert_eq!(Direction::ALL.iter().filter(|d| d.is_orthogonal()).count(), 4);
    }

    #[test]
    fn test_index_and_display() {
        assert_eq!(Coord::new(0, 0).index(), Some(0));
        assert_eq!(Coord::new(5, 5).index(), Some(35));
        assert_eq!(Coord::new(6, 5).index(), None);
        assert_eq!(Coord::new(2, 0).to_string(), "c1");
        assert_eq!(Coord::new(5, 5).to_string(), "f6");
    }

    #[test]
    fn test_extreme_coords_do_not_overflow() {
        assert_eq!(Coord::new(0, 127).to_string(), "(0, 127)");
        assert_eq!(Coord::new(-128, 2).to_string(), "(-128, 2)");
        assert_eq!(Coord::new(-128, 2).king_distance(Coord::new(127, 2)), 255);
        assert_eq!(project(Direction::East, 4, Coord::new(126, 0)), None);
        assert!(neighbors8(Coord::new(127, 127)).is_empty());
    }
}
