//! Legal re-insertion slots for a picked edge cell.
//!
//! A cube may go back in from any side of its line except the side it was
//! taken from:
//!
//! - a cube on the top row can re-enter its column from the south, a bottom
//!   row cube from the north, a left column cube its row from the east, a
//!   right column cube from the west;
//! - a straight (non-corner) edge cube may also re-enter along the edge it
//!   sits on, from either end.
//!
//! Corners therefore get 2 slots, straight edge cells 3, interior cells none.

use smallvec::SmallVec;

use crate::board::{Coord, Side, Slot};

/// Candidate set. Never more than 3 entries.
pub type Candidates = SmallVec<[Slot; 3]>;

/// Insertion slots for the cell at `at` on a board of side `size`.
///
/// Returns an empty set for interior and off-board coordinates. Order is
/// deterministic: the slot opposite the cell's own edge first, then the
/// slots along that edge.
#[must_use]
pub fn insertion_candidates(at: Coord, size: u8) -> Candidates {
    let mut out = Candidates::new();
    let Coord { row, col } = at;
    let on_board = (1..=size).contains(&row) && (1..=size).contains(&col);
    if !on_board {
        return out;
    }

    let top = row == 1;
    let bottom = row == size;
    let left = col == 1;
    let right = col == size;

    if top || bottom {
        let opposite = if top { Side::South } else { Side::North };
        out.push(Slot::on_side(opposite, col, size));
        if left {
            out.push(Slot::on_side(Side::East, row, size));
        } else if right {
            out.push(Slot::on_side(Side::West, row, size));
        } else {
            out.push(Slot::on_side(Side::West, row, size));
            out.push(Slot::on_side(Side::East, row, size));
        }
    } else if left || right {
        let opposite = if left { Side::East } else { Side::West };
        out.push(Slot::on_side(opposite, row, size));
        out.push(Slot::on_side(Side::North, col, size));
        out.push(Slot::on_side(Side::South, col, size));
    }

    out
}
