//! Quote management module.
//!
//! - [`model`] - The quote record and the seed collection
//! - [`store`] - The in-memory, append-only [`QuoteBook`]
//! - [`merge`] - Additive reconciliation of remote records
//! - [`import`] - JSON import/export
//! - [`fetcher`] - The remote source trait
//! - [`sync`] - Sync cycle results and the in-flight guard
//! - [`service`] - The service that owns the collection
//!
//! # Architecture
//!
//! ```text
//! Scheduler / CLI → QuoteService → QuoteFetcher (remote crate)
//!                        ↓
//!              QuoteBook + QuoteStorage → QuoteEventSink
//! ```

pub mod fetcher;
pub mod import;
pub mod merge;
pub mod model;
pub mod service;
pub mod store;
pub mod sync;


pub use fetcher::QuoteFetcher;
pub use import::{export_quotes, parse_import, ImportBatch, ImportResult, DEFAULT_EXPORT_FILE};
pub use merge::{merge, MergeOutcome};
pub use model::{seed_quotes, Quote};
pub use service::{QuoteService, QuoteServiceTrait, SyncOptions};
pub use store::QuoteBook;
pub use sync::{SyncOutcome, SyncReport};
