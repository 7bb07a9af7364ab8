//! File-backed storage for Quotebook.
//!
//! Implements the core [`KeyValueStore`](quotebook_core::storage::KeyValueStore)
//! trait on top of a single JSON document, standing in for browser
//! `localStorage`.

mod file_store;

pub use file_store::{build_file_store, FileKeyValueStore, STORAGE_FILE_NAME};
