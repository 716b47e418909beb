//! Cells ("cubes") and the marks they carry.

use serde::{Deserialize, Serialize};

use super::coord::Coord;
use crate::core::PlayerId;

/// The face a cube shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Unclaimed cube.
    #[default]
    Empty,
    /// Claimed by seat 0.
    X,
    /// Claimed by seat 1.
    O,
}

impl Mark {
    /// The mark a seat plays with.
    #[must_use]
    pub const fn of(player: PlayerId) -> Self {
        match player.0 {
            0 => Mark::X,
            _ => Mark::O,
        }
    }

    /// The seat owning this mark, `None` for `Empty`.
    #[must_use]
    pub const fn owner(self) -> Option<PlayerId> {
        match self {
            Mark::Empty => None,
            Mark::X => Some(PlayerId::new(0)),
            Mark::O => Some(PlayerId::new(1)),
        }
    }

    /// The mark in play after `turn_count` committed turns.
    #[must_use]
    pub const fn for_turn(turn_count: u32) -> Self {
        Self::of(PlayerId::for_turn(turn_count))
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// Single-character rendering used by board display.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// One playable grid position.
///
/// Position and edge classification are fixed at construction. The mark is
/// the only thing that changes during play, plus a one-level memory of the
/// previous mark so a pick can be cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    position: Coord,
    mark: Mark,
    previous: Option<Mark>,
    edge: bool,
    corner: bool,
}

impl Cell {
    /// Create an empty cell at `position` on a board of side `size`.
    #[must_use]
    pub fn new(position: Coord, size: u8) -> Self {
        let on_rim = |v: u8| v == 1 || v == size;
        Self {
            position,
            mark: Mark::Empty,
            previous: None,
            edge: on_rim(position.row) || on_rim(position.col),
            corner: on_rim(position.row) && on_rim(position.col),
        }
    }

    #[must_use]
    pub fn position(&self) -> Coord {
        self.position
    }

    #[must_use]
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Edge cells sit on the outer ring and are the only pickable cells.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.edge
    }

    #[must_use]
    pub fn is_corner(&self) -> bool {
        self.corner
    }

    /// The mark remembered by the last `set_mark`, if not yet reverted.
    #[must_use]
    pub fn previous_mark(&self) -> Option<Mark> {
        self.previous
    }

    /// Set the mark, remembering the current one for [`Cell::revert_mark`].
    pub fn set_mark(&mut self, mark: Mark) {
        self.previous = Some(self.mark);
        self.mark = mark;
    }

    /// Restore the mark saved by the last `set_mark`.
    ///
    /// Returns false when there is nothing to revert.
    pub fn revert_mark(&mut self) -> bool {
        match self.previous.take() {
            Some(previous) => {
                self.mark = previous;
                true
            }
            None => false,
        }
    }

    /// Force the mark to `Empty`. Not a move, nothing is remembered.
    pub fn clear(&mut self) {
        self.mark = Mark::Empty;
        self.previous = None;
    }

    /// Overwrite the mark without remembering the old one (cascade shifts).
    pub(crate) fn put_mark(&mut self, mark: Mark) {
        self.mark = mark;
    }

    /// Drop the remembered mark once a pick is committed.
    pub(crate) fn forget_previous(&mut self) {
        self.previous = None;
    }

    /// Reinstate a remembered mark when loading a snapshot.
    pub(crate) fn restore_previous(&mut self, previous: Mark) {
        self.previous = Some(previous);
    }
}
