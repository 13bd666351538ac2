//! Session state persistence.
//!
//! The engine itself is storage-agnostic: it produces and consumes a
//! [`SessionSnapshot`]. A [`StateStore`] decides where snapshots live.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{PersistenceError, Result};
use crate::interaction::InteractionSnapshot;
use crate::selection::SelectionSnapshot;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    /// Absent when the selection should start from defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionSnapshot>,
    #[serde(default)]
    pub interactions: InteractionSnapshot,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            selection: None,
            interactions: InteractionSnapshot::new(),
        }
    }
}

impl SessionSnapshot {
    /// Parse a snapshot, rejecting versions newer than this build understands.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(text)?;
        if snapshot.version == 0 || snapshot.version > SNAPSHOT_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Storage backend for session snapshots.
pub trait StateStore {
    /// Load the stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<SessionSnapshot>>;

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()>;
}

/// In-memory store, mainly for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStateStore {
    snapshot: Option<SessionSnapshot>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}

/// JSON file store.
///
/// Saves write to a temporary file in the same directory and rename it over
/// the target, so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct JsonFileStateStore {
    path: PathBuf,
}

impl JsonFileStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> Result<PathBuf> {
        match self.path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => Ok(PathBuf::from(".")),
            Some(parent) => Ok(parent.to_path_buf()),
            None => Err(PersistenceError::InvalidPath(self.path.clone())),
        }
    }
}

impl StateStore for JsonFileStateStore {
    fn load(&self) -> Result<Option<SessionSnapshot>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved state");
                return Ok(None);
            }
            Err(error) => return Err(error.into()),
        };
        let snapshot = SessionSnapshot::from_json_str(&text)?;
        info!(
            path = %self.path.display(),
            topics = snapshot.interactions.len(),
            "loaded session state"
        );
        Ok(Some(snapshot))
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let parent = self.parent_dir()?;
        fs::create_dir_all(&parent)?;
        let json = snapshot.to_json_string()?;

        let mut file = NamedTempFile::new_in(&parent)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|error| error.error)?;

        info!(
            path = %self.path.display(),
            topics = snapshot.interactions.len(),
            "saved session state"
        );
        Ok(())
    }
}
