//! Wire types for the remote endpoint.

use serde::{Deserialize, Serialize};

use quotebook_core::quotes::Quote;

/// A post as listed by the remote endpoint.
///
/// Only `title` matters to the quote collection; the other fields are kept
/// for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemotePost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
}

impl RemotePost {
    /// Adapts the post to a quote in the `Server` category.
    ///
    /// Posts without a usable title yield `None`.
    pub fn into_quote(self) -> Option<Quote> {
        let title = self.title?;
        if title.trim().is_empty() {
            return None;
        }
        Some(Quote::from_server(title))
    }
}
