//! Board geometry: the fixed 6×6 intersection grid.
//!
//! Pure functions only. Occupancy lives in `tokens::TokenRegistry`.

pub mod coord;

pub use coord::{in_bounds, neighbors8, project, Coord, Direction, BOARD_SIZE, CELL_COUNT};
