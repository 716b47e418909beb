//! Board coordinates and insertion slots.
//!
//! Playable cells live at rows and columns `1..=N`. The ring just outside the
//! playable area (row or column `0` or `N + 1`) holds the insertion slots: a
//! slot is a "push from this side" target, never a stored cell. The four
//! margin corners are not slots since a corner has no push direction.

use serde::{Deserialize, Serialize};

/// Position of a playable cell (1-based row and column).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side of the board an insertion slot sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Row 0: pushes down a column.
    North,
    /// Row N+1: pushes up a column.
    South,
    /// Column 0: pushes right along a row.
    West,
    /// Column N+1: pushes left along a row.
    East,
}

/// An insertion target on the margin ring.
///
/// `Slot` carries raw margin coordinates; which side it is on depends on the
/// board size, so classification goes through [`Slot::side`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    pub row: u8,
    pub col: u8,
}

impl Slot {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The slot on `side` that lines up with `line` (a column for North/South,
    /// a row for West/East) on a board of side `size`.
    #[must_use]
    pub const fn on_side(side: Side, line: u8, size: u8) -> Self {
        match side {
            Side::North => Self::new(0, line),
            Side::South => Self::new(size + 1, line),
            Side::West => Self::new(line, 0),
            Side::East => Self::new(line, size + 1),
        }
    }

    /// Which side this slot is on for a board of side `size`.
    ///
    /// Returns `None` for coordinates that are not a slot: playable cells,
    /// the four margin corners, and anything beyond the margin.
    #[must_use]
    pub fn side(self, size: u8) -> Option<Side> {
        let edge = size + 1;
        let in_line = |v: u8| (1..=size).contains(&v);
        match (self.row, self.col) {
            (0, c) if in_line(c) => Some(Side::North),
            (r, c) if r == edge && in_line(c) => Some(Side::South),
            (r, 0) if in_line(r) => Some(Side::West),
            (r, c) if c == edge && in_line(r) => Some(Side::East),
            _ => None,
        }
    }

    /// The playable cell directly adjacent to this slot.
    #[must_use]
    pub fn entry_cell(self, size: u8) -> Option<Coord> {
        Some(match self.side(size)? {
            Side::North => Coord::new(1, self.col),
            Side::South => Coord::new(size, self.col),
            Side::West => Coord::new(self.row, 1),
            Side::East => Coord::new(self.row, size),
        })
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
