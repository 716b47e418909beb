//! Encoders for the snapshot envelope.
//!
//! JSON is the interchange form (human-readable, diffable); bincode is the
//! compact form for local storage. Both wrap the snapshot in a
//! [`VersionedSnapshot`] and upgrade on decode.

use std::path::Path;

use tracing::debug;

use super::schema::{Snapshot, VersionedSnapshot, SNAPSHOT_VERSION};
use crate::error::SnapshotError;

fn open(envelope: VersionedSnapshot) -> Snapshot {
    let version = envelope.version();
    if version < SNAPSHOT_VERSION {
        debug!(version, current = SNAPSHOT_VERSION, "Upgrading snapshot");
    }
    envelope.upgrade()
}

impl Snapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&VersionedSnapshot::from(self.clone()))?)
    }

    /// Decode JSON of any supported version.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let envelope: VersionedSnapshot = serde_json::from_str(text)?;
        Ok(open(envelope))
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&VersionedSnapshot::from(self.clone()))?)
    }

    /// Decode bincode of any supported version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let envelope: VersionedSnapshot = bincode::deserialize(bytes)?;
        Ok(open(envelope))
    }

    /// Write JSON to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let text = self.to_json()?;
        std::fs::write(path, text).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read JSON from `path`.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
