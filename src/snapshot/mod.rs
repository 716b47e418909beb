//! Versioned snapshots of a match.
//!
//! A snapshot carries everything needed to resume a match in the exact
//! phase it was captured in, including a half-finished turn. Two clients
//! sharing a match exchange snapshots; the engine hands one to its observer
//! after every commit.

pub mod codec;
pub mod convert;
pub mod schema;

pub use schema::{
    CellRecord, PickRecord, Snapshot, SnapshotV1, VersionedSnapshot, SNAPSHOT_VERSION,
};
