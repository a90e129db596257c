//! JSON-file backed preference store
//!
//! Persists preferences as a pretty-printed JSON document so the file can
//! be edited by hand or by other processes. Outside edits are detected by
//! comparing the file's modification time, the same way the service
//! detects them between polls.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fgate_core::prefs::Preferences;
use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::traits::PreferenceStore;
use crate::{Error, Result};

/// Preference store backed by a JSON file
pub struct JsonPreferenceStore {
    path: PathBuf,
    last_modified: RwLock<Option<SystemTime>>,
    generation: watch::Sender<u64>,
}

impl JsonPreferenceStore {
    /// Create a store for the given file path.
    ///
    /// The file does not have to exist yet; a missing file reads as "no
    /// preferences stored" (fresh-install state).
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            path: path.as_ref().to_path_buf(),
            last_modified: RwLock::new(None),
            generation,
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the file changed on disk since it was last read or
    /// written, and notify subscribers if so.
    ///
    /// Returns whether a change was detected. Intended to be driven by a
    /// periodic poll while the service runs.
    pub fn poll_reload(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let modified = self.modified_time()?;
        let last = *self.last_modified.read();

        if last.map_or(true, |seen| modified > seen) {
            info!(path = %self.path.display(), "preference file changed on disk");
            *self.last_modified.write() = Some(modified);
            self.generation.send_modify(|g| *g += 1);
            return Ok(true);
        }

        Ok(false)
    }

    fn modified_time(&self) -> Result<SystemTime> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))?;
        metadata
            .modified()
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))
    }

    fn record_mtime(&self) {
        if let Ok(modified) = self.modified_time() {
            *self.last_modified.write() = Some(modified);
        }
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load(&self) -> Result<Option<Preferences>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no preference file yet");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))?;
        let prefs: Preferences = serde_json::from_str(&content)
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))?;

        self.record_mtime();
        Ok(Some(prefs))
    }

    fn store(&self, prefs: &Preferences) -> Result<()> {
        let content = serde_json::to_string_pretty(prefs)
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| Error::store(self.path.display().to_string(), e.to_string()))?;

        self.record_mtime();
        self.generation.send_modify(|g| *g += 1);
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.generation.subscribe()
    }
}
