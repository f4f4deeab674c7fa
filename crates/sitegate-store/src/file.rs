//! File-backed bypass slot.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use sitegate_utils::atomic_write::write_file_atomic;
use std::fs;
use std::io;
use tracing::debug;

use crate::{BypassStore, StoreError};

/// Name of the record file inside the application data directory.
const RECORD_FILE: &str = "bypass.json";

/// JSON-file slot at a fixed path, surviving process restarts.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Utf8PathBuf,
}

impl FileStore {
    /// Store backed by an explicit file path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-device location,
    /// `<local data dir>/sitegate/bypass.json`.
    ///
    /// Fails when the platform exposes no local data directory; callers fall
    /// back to [`UnavailableStore`](crate::UnavailableStore) in that case.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_record_path()?))
    }

    /// Path of the underlying record file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

fn default_record_path() -> Result<Utf8PathBuf> {
    let base = dirs::data_local_dir().context("no local data directory on this platform")?;
    let base = Utf8PathBuf::from_path_buf(base)
        .map_err(|p| anyhow::anyhow!("local data directory is not UTF-8: {}", p.display()))?;
    Ok(base.join("sitegate").join(RECORD_FILE))
}

impl BypassStore for FileStore {
    fn get(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path.as_std_path()) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                reason: e.to_string(),
            }),
        }
    }

    fn set(&self, value: &str) -> Result<(), StoreError> {
        write_file_atomic(&self.path, value).map_err(|e| StoreError::WriteFailed {
            reason: format!("{e:#}"),
        })
    }

    fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(self.path.as_std_path()) {
            Ok(()) => {
                debug!(path = %self.path, "bypass slot deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteFailed {
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> FileStore {
        let path = Utf8PathBuf::from_path_buf(dir.path().join(RECORD_FILE))
            .expect("temp paths are UTF-8");
        FileStore::new(path)
    }

    #[test]
    fn get_on_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("{\"granted\":true,\"expiresAt\":1}").unwrap();

        assert_eq!(
            store.get().unwrap().as_deref(),
            Some("{\"granted\":true,\"expiresAt\":1}")
        );
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("old").unwrap();
        store.set("new").unwrap();

        assert_eq!(store.get().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.set("value").unwrap();
        store.delete().unwrap();
        assert!(store.get().unwrap().is_none());

        // Second delete observes an absent slot and still succeeds.
        store.delete().unwrap();
    }

    #[test]
    fn file_store_reports_available() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).is_available());
    }
}
