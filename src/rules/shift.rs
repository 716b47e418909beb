//! The cascade shift that completes a turn.
//!
//! The picked cube leaves a gap at its position and re-enters at the cell
//! adjacent to the chosen slot. Every cube between the gap and that entry
//! cell slides one step toward the gap; the entry cell then receives the
//! mover's mark. Only the picked cube's row or column is touched.

use crate::board::{Board, Coord, Mark, Side, Slot};

/// Apply the shift for a cube picked at `pick` and inserted at `slot`.
///
/// Returns `false` (board untouched) when the pair is not geometrically
/// consistent: the slot is not on the pick's row or column, or `pick` is not
/// a cell. Callers validate legality beforehand; this only guards geometry.
pub fn cascade_shift(board: &mut Board, pick: Coord, slot: Slot, mark: Mark) -> bool {
    let size = board.size();
    let Some(side) = slot.side(size) else {
        return false;
    };
    if board.cell(pick).is_none() {
        return false;
    }

    let aligned = match side {
        Side::North | Side::South => slot.col == pick.col,
        Side::West | Side::East => slot.row == pick.row,
    };
    if !aligned {
        return false;
    }

    // Positions along the line, ordered from the pick toward the entry cell.
    let line: Vec<Coord> = match side {
        Side::North => (1..=pick.row).rev().map(|r| Coord::new(r, pick.col)).collect(),
        Side::South => (pick.row..=size).map(|r| Coord::new(r, pick.col)).collect(),
        Side::West => (1..=pick.col).rev().map(|c| Coord::new(pick.row, c)).collect(),
        Side::East => (pick.col..=size).map(|c| Coord::new(pick.row, c)).collect(),
    };

    for pair in line.windows(2) {
        let Some(next) = board.cell(pair[1]).map(|c| c.mark()) else {
            return false;
        };
        if let Some(cell) = board.cell_mut(pair[0]) {
            cell.put_mark(next);
        }
    }
    if let Some(entry) = line.last().and_then(|&at| board.cell_mut(at)) {
        entry.put_mark(mark);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(board: &Board, col: u8) -> Vec<Mark> {
        board.column(col).collect()
    }

    fn row(board: &Board, r: u8) -> Vec<Mark> {
        board.row(r).collect()
    }

    fn put(board: &mut Board, row: u8, col: u8, mark: Mark) {
        board.cell_at_mut(row, col).unwrap().put_mark(mark);
    }

    #[test]
    fn test_push_from_south_shifts_column_up() {
        let mut board = Board::new(5).unwrap();
        put(&mut board, 2, 1, Mark::O);
        put(&mut board, 4, 1, Mark::X);

        assert!(cascade_shift(&mut board, Coord::new(1, 1), Slot::new(6, 1), Mark::X));

        assert_eq!(
            column(&board, 1),
            vec![Mark::O, Mark::Empty, Mark::X, Mark::Empty, Mark::X]
        );
    }

    #[test]
    fn test_push_from_north_shifts_column_down() {
        let mut board = Board::new(5).unwrap();
        put(&mut board, 1, 3, Mark::O);
        put(&mut board, 3, 3, Mark::X);

        assert!(cascade_shift(&mut board, Coord::new(5, 3), Slot::new(0, 3), Mark::O));

        assert_eq!(
            column(&board, 3),
            vec![Mark::O, Mark::O, Mark::Empty, Mark::X, Mark::Empty]
        );
    }

    #[test]
    fn test_push_along_own_row() {
        let mut board = Board::new(5).unwrap();
        put(&mut board, 1, 1, Mark::X);
        put(&mut board, 1, 2, Mark::O);

        // Cube at (1, 3) re-enters from the west end of row 1.
        assert!(cascade_shift(&mut board, Coord::new(1, 3), Slot::new(1, 0), Mark::X));
        assert_eq!(
            row(&board, 1),
            vec![Mark::X, Mark::X, Mark::O, Mark::Empty, Mark::Empty]
        );

        // Cube at (1, 3) re-enters from the east end.
        let mut board = Board::new(5).unwrap();
        put(&mut board, 1, 4, Mark::O);
        put(&mut board, 1, 5, Mark::X);
        assert!(cascade_shift(&mut board, Coord::new(1, 3), Slot::new(1, 6), Mark::O));
        assert_eq!(
            row(&board, 1),
            vec![Mark::Empty, Mark::Empty, Mark::O, Mark::X, Mark::O]
        );
    }

    #[test]
    fn test_other_lines_untouched() {
        let mut board = Board::new(5).unwrap();
        put(&mut board, 2, 2, Mark::O);
        put(&mut board, 5, 2, Mark::X);

        assert!(cascade_shift(&mut board, Coord::new(3, 1), Slot::new(3, 6), Mark::X));

        assert_eq!(board.mark_at(2, 2), Some(Mark::O));
        assert_eq!(board.mark_at(5, 2), Some(Mark::X));
        assert_eq!(board.mark_at(3, 5), Some(Mark::X));
    }

    #[test]
    fn test_misaligned_slot_is_rejected() {
        let mut board = Board::new(5).unwrap();
        let before = board.clone();
        assert!(!cascade_shift(&mut board, Coord::new(1, 1), Slot::new(6, 2), Mark::X));
        assert!(!cascade_shift(&mut board, Coord::new(1, 1), Slot::new(0, 0), Mark::X));
        assert_eq!(board, before);
    }
}
