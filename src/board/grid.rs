//! The board: an N×N grid of cells surrounded by a ring of insertion slots.
//!
//! Storage is a flat row-major `Vec<Cell>` holding only the playable cells.
//! Coordinates on the margin ring (row or column `0` / `N + 1`) are valid
//! *slots* but never stored, so `cell_at` returns `None` for them.
//!
//! ```
//! use quixo_engine::board::{Board, Mark};
//!
//! let mut board = Board::new(5).unwrap();
//! assert!(board.cell_at(1, 1).unwrap().is_edge());
//! assert!(board.cell_at(0, 3).is_none());
//!
//! board.cell_at_mut(3, 3).unwrap().set_mark(Mark::X);
//! assert_eq!(board.mark_at(3, 3), Some(Mark::X));
//! ```

use super::cell::{Cell, Mark};
use super::coord::Coord;
use crate::error::ConfigError;

/// Smallest board on which a diagonal is a meaningful line.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 32;

/// Fixed-size square board. Owns its cells exclusively.
///
/// Only [`Board::new`] builds one; persisted boards come back through the
/// snapshot loader, which replays marks onto a fresh board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Build an empty board of side `size`.
    ///
    /// # Errors
    ///
    /// `ConfigError::BoardTooSmall` below 3, `ConfigError::BoardTooLarge`
    /// above [`MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        let size = validate_size(size)?;
        let cells = (1..=size)
            .flat_map(|row| (1..=size).map(move |col| Coord::new(row, col)))
            .map(|pos| Cell::new(pos, size))
            .collect();
        Ok(Self { size, cells })
    }

    /// Board side length N.
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    fn index(&self, row: u8, col: u8) -> Option<usize> {
        let n = self.size;
        if (1..=n).contains(&row) && (1..=n).contains(&col) {
            Some((row as usize - 1) * n as usize + (col as usize - 1))
        } else {
            None
        }
    }

    /// O(1) lookup. `None` for margin or out-of-range coordinates.
    #[must_use]
    pub fn cell_at(&self, row: u8, col: u8) -> Option<&Cell> {
        self.index(row, col).map(|i| &self.cells[i])
    }

    pub fn cell_at_mut(&mut self, row: u8, col: u8) -> Option<&mut Cell> {
        self.index(row, col).map(move |i| &mut self.cells[i])
    }

    #[must_use]
    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.cell_at(at.row, at.col)
    }

    pub fn cell_mut(&mut self, at: Coord) -> Option<&mut Cell> {
        self.cell_at_mut(at.row, at.col)
    }

    #[must_use]
    pub fn mark_at(&self, row: u8, col: u8) -> Option<Mark> {
        self.cell_at(row, col).map(Cell::mark)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> + '_ {
        self.cells.iter_mut()
    }

    // === Lines ===

    /// Marks along row `row`, west to east.
    pub fn row(&self, row: u8) -> impl Iterator<Item = Mark> + '_ {
        (1..=self.size).filter_map(move |col| self.mark_at(row, col))
    }

    /// Marks along column `col`, north to south.
    pub fn column(&self, col: u8) -> impl Iterator<Item = Mark> + '_ {
        (1..=self.size).filter_map(move |row| self.mark_at(row, col))
    }

    /// Top-left to bottom-right.
    pub fn main_diagonal(&self) -> impl Iterator<Item = Mark> + '_ {
        (1..=self.size).filter_map(move |i| self.mark_at(i, i))
    }

    /// Bottom-left to top-right.
    pub fn anti_diagonal(&self) -> impl Iterator<Item = Mark> + '_ {
        let n = self.size;
        (1..=n).filter_map(move |i| self.mark_at(n + 1 - i, i))
    }

    /// Number of cells carrying `mark`.
    #[must_use]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.mark() == mark).count()
    }

    /// Reset every cell to `Empty`.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear);
    }
}

pub(crate) fn validate_size(size: usize) -> Result<u8, ConfigError> {
    if size < MIN_BOARD_SIZE {
        return Err(ConfigError::BoardTooSmall {
            size,
            min: MIN_BOARD_SIZE,
        });
    }
    if size > MAX_BOARD_SIZE {
        return Err(ConfigError::BoardTooLarge {
            size,
            max: MAX_BOARD_SIZE,
        });
    }
    Ok(size as u8)
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 1..=self.size {
            let line: String = self.row(row).map(Mark::symbol).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.cells().count(), 25);
        assert!(board.cells().all(|c| c.mark() == Mark::Empty));
    }

    #[test]
    fn test_size_limits() {
        assert!(matches!(
            Board::new(2),
            Err(ConfigError::BoardTooSmall { size: 2, .. })
        ));
        assert!(matches!(
            Board::new(33),
            Err(ConfigError::BoardTooLarge { size: 33, .. })
        ));
        assert!(Board::new(3).is_ok());
        assert!(Board::new(4).is_ok());
    }

    #[test]
    fn test_margin_is_unpopulated() {
        let board = Board::new(5).unwrap();
        assert!(board.cell_at(0, 0).is_none());
        assert!(board.cell_at(0, 3).is_none());
        assert!(board.cell_at(6, 1).is_none());
        assert!(board.cell_at(3, 6).is_none());
        assert!(board.cell_at(200, 1).is_none());
    }

    #[test]
    fn test_row_major_order() {
        let board = Board::new(3).unwrap();
        let positions: Vec<_> = board.cells().map(|c| c.position()).collect();
        assert_eq!(positions[0], Coord::new(1, 1));
        assert_eq!(positions[2], Coord::new(1, 3));
        assert_eq!(positions[3], Coord::new(2, 1));
        assert_eq!(positions[8], Coord::new(3, 3));

        // Restartable
        assert_eq!(board.cells().count(), board.cells().count());
    }

    #[test]
    fn test_edge_count() {
        let board = Board::new(5).unwrap();
        assert_eq!(board.cells().filter(|c| c.is_edge()).count(), 16);
        assert_eq!(board.cells().filter(|c| c.is_corner()).count(), 4);
    }

    #[test]
    fn test_lines() {
        let mut board = Board::new(3).unwrap();
        board.cell_at_mut(3, 1).unwrap().set_mark(Mark::O);
        board.cell_at_mut(2, 2).unwrap().set_mark(Mark::O);
        board.cell_at_mut(1, 3).unwrap().set_mark(Mark::O);

        assert!(board.anti_diagonal().all(|m| m == Mark::O));
        assert_eq!(board.main_diagonal().filter(|m| *m == Mark::O).count(), 1);
        assert_eq!(board.row(3).collect::<Vec<_>>(), vec![Mark::O, Mark::Empty, Mark::Empty]);
        assert_eq!(board.column(3).collect::<Vec<_>>(), vec![Mark::O, Mark::Empty, Mark::Empty]);
    }

    #[test]
    fn test_clear_and_display() {
        let mut board = Board::new(3).unwrap();
        board.cell_at_mut(1, 1).unwrap().set_mark(Mark::X);
        assert_eq!(board.to_string(), "X..\n...\n...\n");
        assert_eq!(board.count(Mark::X), 1);

        board.clear();
        assert_eq!(board.count(Mark::Empty), 9);
    }
}
