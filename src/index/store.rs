//! Durable storage for index snapshots.
//!
//! A snapshot is stored as a single JSON document at a fixed path chosen by
//! the caller. Saves go through a temporary file in the same directory that
//! is renamed over the target, so a crash mid-write never leaves a partial
//! document where the next load would find it.

use crate::error::{Error, Result};
use crate::index::types::{SNAPSHOT_VERSION, Snapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Serialize)]
struct StoredSnapshotRef<'a> {
    version: u32,
    #[serde(flatten)]
    snapshot: &'a Snapshot,
}

#[derive(Deserialize)]
struct StoredSnapshot {
    #[allow(dead_code)]
    version: u32,
    #[serde(flatten)]
    snapshot: Snapshot,
}

/// Only the header, read before the full decode so old formats are rejected cleanly
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Reads and writes the snapshot file
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Persist a snapshot, replacing any previous one
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

        let tmp = NamedTempFile::new_in(&parent).map_err(|e| Error::io(&parent, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file());
            let stored = StoredSnapshotRef {
                version: SNAPSHOT_VERSION,
                snapshot,
            };
            serde_json::to_writer(&mut writer, &stored)
                .map_err(|e| Error::io(tmp.path(), e.into()))?;
            writer.flush().map_err(|e| Error::io(tmp.path(), e))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|e| Error::io(tmp.path(), e))?;

        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;

        log::debug!(
            "saved snapshot to {} ({} entries)",
            self.path.display(),
            snapshot.len()
        );
        Ok(())
    }

    /// Load the stored snapshot, or an empty one if none has been saved
    pub fn load(&self) -> Result<Snapshot> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Snapshot::default()),
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let snapshot = decode_snapshot(&bytes).map_err(|reason| Error::SnapshotCorrupt {
            path: self.path.clone(),
            reason,
        })?;

        log::debug!(
            "loaded snapshot from {} ({} entries)",
            self.path.display(),
            snapshot.len()
        );
        Ok(snapshot)
    }

    /// Delete the snapshot file; a missing file is not an error
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::io(&self.path, e)),
        }
    }
}

/// Decode the bytes of a stored snapshot
///
/// Returns a human readable reason on failure. Never panics on arbitrary input.
pub fn decode_snapshot(bytes: &[u8]) -> std::result::Result<Snapshot, String> {
    let probe: VersionProbe =
        serde_json::from_slice(bytes).map_err(|e| format!("unreadable header: {}", e))?;
    if probe.version != SNAPSHOT_VERSION {
        return Err(format!(
            "unsupported format version {} (expected {})",
            probe.version, SNAPSHOT_VERSION
        ));
    }

    let stored: StoredSnapshot =
        serde_json::from_slice(bytes).map_err(|e| format!("malformed snapshot: {}", e))?;
    Ok(stored.snapshot)
}
