//! Quotebook Core - Domain entities, services, and traits.
//!
//! This crate contains the quote collection logic: the record model, the
//! additive merge of remote records, category filtering, JSON import/export
//! and the service that owns the in-memory collection.
//! It is storage-agnostic and defines traits that are implemented
//! by the `storage-file` and `remote` crates.

pub mod constants;
pub mod errors;
pub mod events;
pub mod quotes;
pub mod storage;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
