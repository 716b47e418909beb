//! Win detection.
//!
//! A line (row, column, or one of the two full diagonals) wins for a mark
//! when every cell on it carries that mark. `Empty` never wins. A shift can
//! complete lines for both marks at once; that is a tie.

use tracing::instrument;

use super::GameResult;
use crate::board::{Board, Mark};

/// Which marks currently own at least one complete line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineOwners {
    pub x: bool,
    pub o: bool,
}

impl LineOwners {
    fn record(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x = true,
            Mark::O => self.o = true,
            Mark::Empty => {}
        }
    }
}

/// The mark owning every cell of `line`, if any.
fn line_owner(mut line: impl Iterator<Item = Mark>) -> Option<Mark> {
    let first = line.next()?;
    if first.is_empty() {
        return None;
    }
    line.all(|m| m == first).then_some(first)
}

/// Scan every row, column and both diagonals.
#[must_use]
pub fn line_owners(board: &Board) -> LineOwners {
    let mut owners = LineOwners::default();
    let n = board.size();

    for i in 1..=n {
        if let Some(mark) = line_owner(board.row(i)) {
            owners.record(mark);
        }
        if let Some(mark) = line_owner(board.column(i)) {
            owners.record(mark);
        }
    }
    if let Some(mark) = line_owner(board.main_diagonal()) {
        owners.record(mark);
    }
    if let Some(mark) = line_owner(board.anti_diagonal()) {
        owners.record(mark);
    }

    owners
}

/// Evaluate the board after a committed turn.
///
/// Returns `None` while the game continues.
#[instrument(skip(board), level = "trace")]
#[must_use]
pub fn evaluate(board: &Board) -> Option<GameResult> {
    match line_owners(board) {
        LineOwners { x: true, o: true } => Some(GameResult::Tie),
        LineOwners { x: true, o: false } => Mark::X.owner().map(GameResult::Winner),
        LineOwners { x: false, o: true } => Mark::O.owner().map(GameResult::Winner),
        LineOwners { x: false, o: false } => None,
    }
}
