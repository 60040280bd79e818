//! Persistence of the last processed changelog

use crate::error::{NotifierError, Result};
use sha2::{Digest, Sha256};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File name of the cached snapshot
pub const SNAPSHOT_FILE: &str = "last-changelog.md";

/// Compute a stable hash for a snapshot
pub fn snapshot_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Default cache location under the user's cache directory
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("changelog-notifier")
        .join(SNAPSHOT_FILE)
}

/// Storage for the single cached changelog snapshot
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot, `None` if there is none yet
    fn load(&self) -> Result<Option<String>>;

    /// Replace the snapshot
    fn save(&self, content: &str) -> Result<()>;
}

/// Snapshot kept in a single file
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by the given file
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `content` to a temporary file next to the snapshot.
    ///
    /// The snapshot itself is untouched until the staged file is persisted.
    fn stage(&self, content: &str) -> Result<NamedTempFile> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.cache_error(e))?;

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| self.cache_error(e))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| self.cache_error(e))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| self.cache_error(e))?;

        Ok(staged)
    }

    fn cache_error(&self, source: std::io::Error) -> NotifierError {
        NotifierError::Cache {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileSnapshotStore {
    fn default() -> Self {
        Self::new(default_cache_path())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.cache_error(e)),
        }
    }

    fn save(&self, content: &str) -> Result<()> {
        let staged = self.stage(content)?;
        staged
            .persist(&self.path)
            .map_err(|e| self.cache_error(e.error))?;

        tracing::debug!("Saved snapshot to {:?}", self.path);
        Ok(())
    }
}
