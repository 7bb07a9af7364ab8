//! Quote service owning the in-memory collection.
//!
//! Every mutation goes through this service. It prepares the next
//! collection from a copy of the [`QuoteBook`], persists it through
//! [`QuoteStorage`], and only once the write succeeded swaps it in and emits
//! [`QuoteEvent`]s. A failed write leaves the book as it was.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::fetcher::QuoteFetcher;
use super::import::{apply_import, export_quotes, parse_import, ImportResult};
use super::merge::{merge, MergeOutcome};
use super::model::Quote;
use super::store::QuoteBook;
use super::sync::{InFlightGuard, SyncOutcome, SyncReport};
use crate::errors::{Error, Result, StorageError};
use crate::events::{QuoteEvent, QuoteEventSink};
use crate::storage::QuoteStorage;

/// Behaviour switches for sync cycles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Push the local collection to the remote endpoint after each merge.
    pub push_on_sync: bool,
}

/// Operations available to front ends.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Snapshot of the whole collection in insertion order.
    async fn all_quotes(&self) -> Vec<Quote>;

    /// Distinct categories in order of first appearance.
    async fn categories(&self) -> Vec<String>;

    /// Adds a quote after trimming both fields.
    ///
    /// Returns `Ok(None)` without touching the collection when either field
    /// is empty after trimming.
    async fn add_quote(&self, text: &str, category: &str) -> Result<Option<Quote>>;

    /// Persists the category filter and returns a random quote from it.
    /// An empty category clears the filter.
    async fn select_category(&self, category: &str) -> Result<Option<Quote>>;

    /// The saved filter, if it still names an existing category; empty otherwise.
    async fn active_category(&self) -> Result<String>;

    /// Picks a random quote honouring the active filter and records it as
    /// last viewed. `None` when no quote matches.
    async fn show_random_quote(&self) -> Result<Option<Quote>>;

    /// The quote shown last in this session.
    fn last_viewed_quote(&self) -> Result<Option<Quote>>;

    /// Pretty-printed JSON array of the whole collection.
    async fn export_json(&self) -> Result<String>;

    /// Imports a JSON array of quotes. Rejected payloads leave the
    /// collection unchanged.
    async fn import_json(&self, raw: &str) -> Result<ImportResult>;

    /// Runs one fetch → merge → push cycle unless one is already running.
    async fn sync_with_remote(&self) -> Result<SyncOutcome>;
}

pub struct QuoteService {
    book: RwLock<QuoteBook>,
    storage: QuoteStorage,
    fetcher: Arc<dyn QuoteFetcher>,
    events: Arc<dyn QuoteEventSink>,
    options: SyncOptions,
    syncing: AtomicBool,
}

impl QuoteService {
    /// Loads the persisted collection, falling back to the seed set when it is
    /// missing or unreadable, and writes the result back. A failed write-back
    /// is only logged; the next mutation reports it.
    pub fn load(
        storage: QuoteStorage,
        fetcher: Arc<dyn QuoteFetcher>,
        events: Arc<dyn QuoteEventSink>,
        options: SyncOptions,
    ) -> Result<Self> {
        let book = match storage.load_quotes() {
            Ok(Some(quotes)) => {
                debug!("Loaded {} quotes from storage", quotes.len());
                QuoteBook::from_quotes(quotes)
            }
            Ok(None) => {
                info!("No stored quotes found, starting from the seed collection");
                QuoteBook::seeded()
            }
            Err(Error::Storage(StorageError::Corrupt { key, message })) => {
                warn!(
                    "Stored quotes under '{}' could not be decoded ({}), using the seed collection",
                    key, message
                );
                QuoteBook::seeded()
            }
            Err(Error::Storage(e)) => {
                warn!("Could not read stored quotes ({}), using the seed collection", e);
                QuoteBook::seeded()
            }
            Err(e) => return Err(e),
        };
        if let Err(e) = storage.save_quotes(book.as_slice()) {
            warn!("Could not persist the loaded collection: {}", e);
        }

        Ok(Self {
            book: RwLock::new(book),
            storage,
            fetcher,
            events,
            options,
            syncing: AtomicBool::new(false),
        })
    }

    /// Runs a storage call on the blocking pool.
    async fn with_storage<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&QuoteStorage) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let storage = self.storage.clone();
        tokio::task::spawn_blocking(move || op(&storage))
            .await
            .map_err(|e| Error::TaskFailed(e.to_string()))?
    }

    /// Persists `candidate`, returning it for the caller to swap in.
    async fn persist(&self, candidate: QuoteBook) -> Result<QuoteBook> {
        self.with_storage(move |storage| {
            storage.save_quotes(candidate.as_slice())?;
            Ok(candidate)
        })
        .await
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn all_quotes(&self) -> Vec<Quote> {
        self.book.read().await.as_slice().to_vec()
    }

    async fn categories(&self) -> Vec<String> {
        self.book.read().await.categories()
    }

    async fn add_quote(&self, text: &str, category: &str) -> Result<Option<Quote>> {
        let quote = Quote::new(text.trim(), category.trim());
        if !quote.is_complete() {
            debug!("Ignoring add with empty text or category");
            return Ok(None);
        }

        {
            let mut book = self.book.write().await;
            let mut candidate = book.clone();
            candidate.push(quote.clone());
            *book = self.persist(candidate).await?;
        }

        self.events
            .emit(QuoteEvent::quote_added(&quote.text, &quote.category));
        Ok(Some(quote))
    }

    async fn select_category(&self, category: &str) -> Result<Option<Quote>> {
        if !category.is_empty() && !self.categories().await.iter().any(|c| c == category) {
            return Err(Error::UnknownCategory(category.to_string()));
        }
        let category = category.to_string();
        self.with_storage(move |storage| storage.save_selected_category(&category))
            .await?;
        self.show_random_quote().await
    }

    async fn active_category(&self) -> Result<String> {
        let saved = self.storage.load_selected_category()?;
        if saved.is_empty() || self.categories().await.contains(&saved) {
            Ok(saved)
        } else {
            debug!("Saved category '{}' no longer exists, showing all", saved);
            Ok(String::new())
        }
    }

    async fn show_random_quote(&self) -> Result<Option<Quote>> {
        let category = self.active_category().await?;
        let chosen = {
            let book = self.book.read().await;
            let candidates = book.filtered(&category);
            let mut rng = rand::thread_rng();
            candidates.choose(&mut rng).map(|quote| (*quote).clone())
        };

        if let Some(quote) = &chosen {
            self.storage.save_last_viewed(quote)?;
        }
        Ok(chosen)
    }

    fn last_viewed_quote(&self) -> Result<Option<Quote>> {
        self.storage.load_last_viewed()
    }

    async fn export_json(&self) -> Result<String> {
        let book = self.book.read().await;
        export_quotes(book.as_slice())
    }

    async fn import_json(&self, raw: &str) -> Result<ImportResult> {
        let batch = parse_import(raw)?;

        let result = {
            let mut book = self.book.write().await;
            let mut candidate = book.clone();
            let result = apply_import(&mut candidate, batch);
            *book = self.persist(candidate).await?;
            result
        };

        info!(
            "Imported {} quotes ({} duplicates, {} incomplete)",
            result.added, result.duplicates, result.incomplete
        );
        self.events
            .emit(QuoteEvent::quotes_imported(result.added, result.skipped()));
        Ok(result)
    }

    async fn sync_with_remote(&self) -> Result<SyncOutcome> {
        let Some(_guard) = InFlightGuard::try_acquire(&self.syncing) else {
            debug!("Sync requested while another cycle is running, skipping");
            return Ok(SyncOutcome::AlreadyRunning);
        };

        let remote = self.fetcher.fetch_quotes().await?;
        let fetched = remote.len();

        let added = {
            let mut book = self.book.write().await;
            let MergeOutcome { quotes, added } = merge(book.as_slice(), &remote);
            if !added.is_empty() {
                *book = self.persist(QuoteBook::from_quotes(quotes)).await?;
            }
            added
        };

        self.events.emit_batch(
            added
                .iter()
                .map(|quote| QuoteEvent::new_quote_from_server(&quote.text))
                .collect(),
        );

        let pushed = if self.options.push_on_sync {
            let snapshot = self.all_quotes().await;
            match self.fetcher.push_quotes(&snapshot).await {
                Ok(response) => {
                    debug!("Pushed {} quotes, server replied: {}", snapshot.len(), response);
                    true
                }
                Err(e) => {
                    warn!("Push of local quotes failed: {}", e);
                    false
                }
            }
        } else {
            false
        };

        self.events.emit(QuoteEvent::quotes_synced(added.len()));

        let report = SyncReport {
            fetched,
            added,
            pushed,
            completed_at: Utc::now(),
        };
        info!("Sync completed: {}", report.summary());
        Ok(SyncOutcome::Completed(report))
    }
}
