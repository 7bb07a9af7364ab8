//! Quotebook Remote - HTTP access to the remote quote endpoint.
//!
//! The endpoint is a public mock REST API that lists "posts". Each post's
//! title becomes the text of a quote filed under the `Server` category.
//!
//! # Usage
//!
//! ```rust,ignore
//! use quotebook_remote::RemoteQuoteClient;
//!
//! let client = RemoteQuoteClient::new(
//!     "https://jsonplaceholder.typicode.com/posts",
//!     5,
//!     std::time::Duration::from_secs(30),
//! )?;
//! let quotes = client.fetch_quotes().await?;
//! ```

mod client;
mod error;
mod types;

pub use client::{RemoteQuoteClient, DEFAULT_TIMEOUT_SECS};
pub use error::{RemoteError, Result};
pub use types::*;
