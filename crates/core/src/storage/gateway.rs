//! Typed access to the quote collection and viewing state.

use std::sync::Arc;

use super::traits::{KeyValueStore, CATEGORY_FILTER_KEY, LAST_VIEWED_KEY, QUOTES_KEY};
use crate::errors::{Result, StorageError};
use crate::quotes::Quote;

/// Reads and writes quote state on top of two key-value stores.
///
/// The quote collection and the category filter go to the persistent store;
/// the last-viewed quote goes to the session store.
#[derive(Clone)]
pub struct QuoteStorage {
    persistent: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
}

impl QuoteStorage {
    pub fn new(persistent: Arc<dyn KeyValueStore>, session: Arc<dyn KeyValueStore>) -> Self {
        Self {
            persistent,
            session,
        }
    }

    /// Loads the persisted collection.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet and
    /// `StorageError::Corrupt` when the stored value is not a quote array.
    pub fn load_quotes(&self) -> Result<Option<Vec<Quote>>> {
        let Some(raw) = self.persistent.get_item(QUOTES_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| corrupt(QUOTES_KEY, e))
    }

    pub fn save_quotes(&self, quotes: &[Quote]) -> Result<()> {
        let raw = serde_json::to_string(quotes)?;
        self.persistent.set_item(QUOTES_KEY, &raw)
    }

    /// The persisted category filter; empty when no filter is set.
    pub fn load_selected_category(&self) -> Result<String> {
        Ok(self
            .persistent
            .get_item(CATEGORY_FILTER_KEY)?
            .unwrap_or_default())
    }

    pub fn save_selected_category(&self, category: &str) -> Result<()> {
        self.persistent.set_item(CATEGORY_FILTER_KEY, category)
    }

    pub fn load_last_viewed(&self) -> Result<Option<Quote>> {
        let Some(raw) = self.session.get_item(LAST_VIEWED_KEY)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| corrupt(LAST_VIEWED_KEY, e))
    }

    pub fn save_last_viewed(&self, quote: &Quote) -> Result<()> {
        let raw = serde_json::to_string(quote)?;
        self.session.set_item(LAST_VIEWED_KEY, &raw)
    }
}

fn corrupt(key: &str, err: serde_json::Error) -> crate::errors::Error {
    StorageError::Corrupt {
        key: key.to_string(),
        message: err.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::storage::MemoryKeyValueStore;

    fn storage() -> (QuoteStorage, Arc<MemoryKeyValueStore>, Arc<MemoryKeyValueStore>) {
        let persistent = Arc::new(MemoryKeyValueStore::new());
        let session = Arc::new(MemoryKeyValueStore::new());
        (
            QuoteStorage::new(persistent.clone(), session.clone()),
            persistent,
            session,
        )
    }

    #[test]
    fn test_quotes_round_trip_under_fixed_key() {
        let (storage, persistent, _) = storage();
        assert!(storage.load_quotes().unwrap().is_none());

        let quotes = vec![Quote::new("A", "Server"), Quote::new("B", "Life")];
        storage.save_quotes(&quotes).unwrap();

        assert_eq!(storage.load_quotes().unwrap(), Some(quotes));
        let raw = persistent.get_item(QUOTES_KEY).unwrap().unwrap();
        assert!(raw.starts_with(r#"[{"text":"A","category":"Server"}"#));
    }

    #[test]
    fn test_corrupt_collection_is_reported() {
        let (storage, persistent, _) = storage();
        persistent.set_item(QUOTES_KEY, "{not json").unwrap();

        match storage.load_quotes() {
            Err(Error::Storage(StorageError::Corrupt { key, .. })) => assert_eq!(key, QUOTES_KEY),
            other => panic!("expected corrupt error, got {:?}", other),
        }
    }

    #[test]
    fn test_selected_category_defaults_to_empty() {
        let (storage, _, _) = storage();
        assert_eq!(storage.load_selected_category().unwrap(), "");

        storage.save_selected_category("Philosophy").unwrap();
        assert_eq!(storage.load_selected_category().unwrap(), "Philosophy");
    }

    #[test]
    fn test_last_viewed_goes_to_session_store() {
        let (storage, persistent, session) = storage();
        let quote = Quote::new("Simplicity is the soul of efficiency.", "Philosophy");

        storage.save_last_viewed(&quote).unwrap();

        assert_eq!(storage.load_last_viewed().unwrap(), Some(quote));
        assert!(session.get_item(LAST_VIEWED_KEY).unwrap().is_some());
        assert!(persistent.get_item(LAST_VIEWED_KEY).unwrap().is_none());
    }
}
