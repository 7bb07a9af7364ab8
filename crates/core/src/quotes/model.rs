//! Domain model for quote records.

use serde::{Deserialize, Serialize};

use crate::constants::{SEED_QUOTES, SERVER_CATEGORY};

/// A single quote: its text and the category it is filed under.
///
/// Two quotes are the same record when both fields are exactly equal
/// (case- and whitespace-sensitive). That equality drives deduplication
/// during merge and import.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// A record adapted from the remote endpoint.
    pub fn from_server(text: impl Into<String>) -> Self {
        Self::new(text, SERVER_CATEGORY)
    }

    /// Both fields are present.
    pub fn is_complete(&self) -> bool {
        !self.text.is_empty() && !self.category.is_empty()
    }

    /// Borrowed identity used for set membership.
    pub fn key(&self) -> (&str, &str) {
        (self.text.as_str(), self.category.as_str())
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// The built-in collection used on first start.
pub fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}
