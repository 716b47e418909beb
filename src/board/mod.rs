//! Board topology: cells, marks, coordinates and insertion slots.
//!
//! The board knows nothing about turns or legality. It classifies cells
//! (edge, corner) and exposes lines for the rules to inspect.

pub mod cell;
pub mod coord;
pub mod grid;

pub use cell::{Cell, Mark};
pub use coord::{Coord, Side, Slot};
pub use grid::{Board, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
