//! Key-value storage traits.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::errors::{Result, StorageError};

/// Storage key for the persisted quote collection.
pub const QUOTES_KEY: &str = "quotesArray";

/// Storage key for the persisted category filter.
pub const CATEGORY_FILTER_KEY: &str = "lastSelectedCategory";

/// Session storage key for the last displayed quote.
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// A string-to-string store.
///
/// Implementations decide on durability: the file-backed store survives
/// restarts, the in-memory store lives as long as the process (one session).
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key has never been written.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Process-lifetime store used for session-scoped entries.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StorageError::LockPoisoned("session store".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("session store".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StorageError::LockPoisoned("session store".into()))?;
        entries.remove(key);
        Ok(())
    }
}
