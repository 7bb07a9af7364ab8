use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use quotebook_core::{errors::StorageError, storage::KeyValueStore, Error, Result};

const CURRENT_VERSION: u32 = 1;

/// Default file name inside the data directory.
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// Persistent key-value store kept in one pretty-printed JSON file.
///
/// Every write rewrites the whole document through a temporary file and a
/// rename, so a crash mid-write leaves the previous document intact.
///
/// A file that is not a storage document reads as `StorageError::Corrupt`.
/// The next write moves it aside to `<name>.json.corrupt` and starts over.
#[derive(Debug)]
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize)]
struct StoredEntries {
    version: u32,
    entries: BTreeMap<String, String>,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_store<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file store".into()))?;
        let mut store = match self.load_store_locked() {
            Err(Error::Storage(StorageError::Corrupt { message, .. })) => {
                let backup = self.path.with_extension("json.corrupt");
                fs::rename(&self.path, &backup).map_err(|e| {
                    StorageError::WriteFailed(format!("{}: {}", self.path.display(), e))
                })?;
                warn!(
                    "Storage file was not readable ({}), moved it to {}",
                    message,
                    backup.display()
                );
                BTreeMap::new()
            }
            other => other?,
        };
        op(&mut store);
        self.persist_store_locked(store)
    }

    fn read_store(&self) -> Result<BTreeMap<String, String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file store".into()))?;
        self.load_store_locked()
    }

    fn load_store_locked(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read(&self.path).map_err(|e| {
            StorageError::ReadFailed(format!("{}: {}", self.path.display(), e))
        })?;
        if raw.is_empty() {
            return Ok(BTreeMap::new());
        }

        let stored: StoredEntries =
            serde_json::from_slice(&raw).map_err(|e| StorageError::Corrupt {
                key: self.path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(stored.entries)
    }

    fn persist_store_locked(&self, entries: BTreeMap<String, String>) -> Result<()> {
        let write_failed =
            |e: std::io::Error| StorageError::WriteFailed(format!("{}: {}", self.path.display(), e));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_failed)?;
            }
        }

        let stored = StoredEntries {
            version: CURRENT_VERSION,
            entries,
        };
        let json = serde_json::to_string_pretty(&stored)?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(write_failed)?;
        fs::rename(&tmp_path, &self.path).map_err(write_failed)?;
        debug!("Persisted storage file {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let store = self.read_store()?;
        Ok(store.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.with_store(|store| {
            store.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.with_store(|store| {
            store.remove(key);
        })
    }
}

/// Opens (lazily) the store file inside `data_dir`.
pub fn build_file_store(data_dir: &Path) -> FileKeyValueStore {
    FileKeyValueStore::new(data_dir.join(STORAGE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quotebook_core::quotes::{Quote, QuoteBook};
    use quotebook_core::storage::{MemoryKeyValueStore, QuoteStorage};
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn round_trip_survives_reopen() {
        let dir = tempdir().unwrap();
        let store = build_file_store(dir.path());

        store.set_item("alpha", "value").unwrap();
        assert_eq!(store.get_item("alpha").unwrap().as_deref(), Some("value"));

        let reopened = build_file_store(dir.path());
        assert_eq!(reopened.get_item("alpha").unwrap().as_deref(), Some("value"));

        reopened.remove_item("alpha").unwrap();
        assert!(store.get_item("alpha").unwrap().is_none());
        assert!(store.path().exists());
    }

    #[test]
    fn missing_or_empty_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested").join("store.json"));
        assert!(store.get_item("anything").unwrap().is_none());

        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(store.path(), "").unwrap();
        assert!(store.get_item("anything").unwrap().is_none());
    }

    #[test]
    fn foreign_file_reads_as_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let store = FileKeyValueStore::new(path);
        let err = store.get_item("alpha").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[test]
    fn write_moves_foreign_file_aside() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();
        let store = FileKeyValueStore::new(path);

        store.set_item("alpha", "value").unwrap();

        assert_eq!(store.get_item("alpha").unwrap().as_deref(), Some("value"));
        let backup = fs::read_to_string(dir.path().join("store.json.corrupt")).unwrap();
        assert_eq!(backup, "not json at all");
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::create_dir_all(&path).unwrap();

        let store = FileKeyValueStore::new(path);
        let err = store.get_item("alpha").unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::ReadFailed(_))));
        assert!(store.set_item("alpha", "value").is_err());
    }

    #[test]
    fn file_is_versioned_and_readable() {
        let dir = tempdir().unwrap();
        let store = build_file_store(dir.path());
        store.set_item("lastSelectedCategory", "Philosophy").unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["entries"]["lastSelectedCategory"], "Philosophy");
    }

    #[test]
    fn quote_collection_persists_across_sessions() {
        let dir = tempdir().unwrap();
        let quotes = QuoteBook::seeded().into_vec();

        let first = QuoteStorage::new(
            Arc::new(build_file_store(dir.path())),
            Arc::new(MemoryKeyValueStore::new()),
        );
        first.save_quotes(&quotes).unwrap();
        first.save_last_viewed(&Quote::new("A", "Server")).unwrap();

        let second = QuoteStorage::new(
            Arc::new(build_file_store(dir.path())),
            Arc::new(MemoryKeyValueStore::new()),
        );
        assert_eq!(second.load_quotes().unwrap(), Some(quotes));
        assert!(second.load_last_viewed().unwrap().is_none());
    }
}
