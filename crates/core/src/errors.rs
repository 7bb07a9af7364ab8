//! Core error types for the Quotebook application.
//!
//! This module defines storage-agnostic error types. Backend-specific errors
//! (file I/O, HTTP) are converted to these types by the implementing crates.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the quote collection.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Remote fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A background storage task panicked or was cancelled.
    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

/// Backend-agnostic error type for key-value storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing store could not be read.
    #[error("Failed to read store: {0}")]
    ReadFailed(String),

    /// The backing store could not be written.
    #[error("Failed to write store: {0}")]
    WriteFailed(String),

    /// A stored value exists but cannot be decoded.
    #[error("Stored value for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Reasons an import payload is rejected as a whole.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid format: expected a JSON array of quotes, got {0}")]
    NotAnArray(&'static str),

    #[error("Could not read import file: {0}")]
    Io(String),
}

/// Errors raised while fetching or pushing quotes to the remote endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Could not decode response: {0}")]
    Decode(String),
}

impl FetchError {
    /// Returns true if the failure is transient and the next cycle may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Decode(_) => false,
        }
    }
}
