//! Durable whole-file persistence for the streak state.
//!
//! The entire collection is one JSON document keyed by user id. There are
//! no partial updates: `load` reads the whole file, `save` atomically
//! replaces it by writing a sibling temp file and renaming it over the
//! target, so a concurrent reader can never observe a torn file.

use crate::error::{Result, StreakError};
use crate::types::StreakState;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed store for the streak state.
///
/// Holds an exclusive lock on a sibling `.lock` file for its lifetime so
/// two processes cannot share one state file.
pub struct StateStore {
    path: PathBuf,

    /// Lock file guarding against a second process.
    _lock_file: File,
}

impl StateStore {
    /// Open a store at the given state-file path, creating parent
    /// directories as needed. The state file itself is created lazily on
    /// the first `save`; a missing file reads as an empty collection.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let lock_file = Self::acquire_lock(&path)?;

        Ok(Self {
            path,
            _lock_file: lock_file,
        })
    }

    /// Read the full collection. A missing file is a first run, not an
    /// error.
    pub fn load(&self) -> Result<StreakState> {
        if !self.path.exists() {
            return Ok(StreakState::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&contents)
            .map_err(|e| StreakError::Deserialization(e.to_string()))?;
        Ok(state)
    }

    /// Write the full collection as a single atomic replacement.
    pub fn save(&self, state: &StreakState) -> Result<()> {
        let encoded = serde_json::to_vec(state)?;

        let tmp_path = sibling(&self.path, ".tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)?;
            file.write_all(&encoded)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), users = state.len(), "state saved");
        Ok(())
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_path = sibling(path, ".lock");
        let lock_file = File::create(lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StreakError::Locked)?;

        Ok(lock_file)
    }
}

/// Sibling path with a suffix appended to the full file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
