//! Snapshot schema, current and historical.
//!
//! The on-wire form is always a [`VersionedSnapshot`]. Older versions are
//! upgraded once, at load time, to the current [`Snapshot`]; nothing past
//! the loader ever sees an old shape.
//!
//! ## Versions
//!
//! - **1**: board, players, turn count, pending pick/target, result.
//! - **2**: adds the active mark (checked against turn parity on load) and
//!   the turn history.

use serde::{Deserialize, Serialize};

use crate::board::{Coord, Mark, Slot};
use crate::engine::TurnRecord;
use crate::rules::GameResult;

/// Schema version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 2;

/// One playable cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub row: u8,
    pub col: u8,
    pub mark: Mark,
}

/// A lifted cube: where it is and what it carried before being claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    pub at: Coord,
    pub previous: Mark,
}

/// Complete match state, current schema.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board_size: usize,
    /// Row-major, `board_size²` entries.
    pub cells: Vec<CellRecord>,
    pub players: Vec<String>,
    pub turn_count: u32,
    pub active_mark: Mark,
    pub pending_pick: Option<PickRecord>,
    pub pending_target: Option<Slot>,
    pub result: Option<GameResult>,
    pub history: Vec<TurnRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn cell(&self, row: u8, col: u8) -> Option<&CellRecord> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    pub fn cell_mut(&mut self, row: u8, col: u8) -> Option<&mut CellRecord> {
        self.cells.iter_mut().find(|c| c.row == row && c.col == col)
    }

    /// Identity whose turn it is, by turn parity.
    ///
    /// Lets a client decide "is it my turn?" without loading the snapshot
    /// into an engine.
    #[must_use]
    pub fn current_identity(&self) -> Option<&str> {
        let seat = usize::try_from(self.turn_count % 2).ok()?;
        self.players.get(seat).map(String::as_str)
    }
}

/// Version 1 layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotV1 {
    pub board_size: usize,
    pub cells: Vec<CellRecord>,
    pub players: Vec<String>,
    pub turn_count: u32,
    pub pending_pick: Option<PickRecord>,
    pub pending_target: Option<Slot>,
    pub result: Option<GameResult>,
}

impl SnapshotV1 {
    /// Derive the fields version 2 added: active mark from parity, no history.
    #[must_use]
    pub fn upgrade(self) -> Snapshot {
        Snapshot {
            active_mark: Mark::for_turn(self.turn_count),
            board_size: self.board_size,
            cells: self.cells,
            players: self.players,
            turn_count: self.turn_count,
            pending_pick: self.pending_pick,
            pending_target: self.pending_target,
            result: self.result,
            history: Vec::new(),
        }
    }
}

/// Envelope tagging a snapshot with its schema version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionedSnapshot {
    V1(SnapshotV1),
    V2(Snapshot),
}

impl VersionedSnapshot {
    #[must_use]
    pub fn version(&self) -> u32 {
        match self {
            VersionedSnapshot::V1(_) => 1,
            VersionedSnapshot::V2(_) => 2,
        }
    }

    /// Bring any version up to the current schema.
    #[must_use]
    pub fn upgrade(self) -> Snapshot {
        match self {
            VersionedSnapshot::V1(v1) => v1.upgrade(),
            VersionedSnapshot::V2(current) => current,
        }
    }
}

impl From<Snapshot> for VersionedSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        VersionedSnapshot::V2(snapshot)
    }
}
