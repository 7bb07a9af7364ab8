//! Remote quote source abstraction.

use async_trait::async_trait;
use serde_json::Value;

use super::model::Quote;
use crate::errors::FetchError;

/// A remote endpoint that lists quotes and accepts pushes of the local
/// collection. Implemented over HTTP by the `remote` crate.
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    /// Fetches a bounded batch of remote records, already adapted to
    /// [`Quote`]. Failures are returned, never swallowed.
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, FetchError>;

    /// Sends the whole local collection. The response body is returned
    /// as-is for logging.
    async fn push_quotes(&self, quotes: &[Quote]) -> Result<Value, FetchError>;
}
