//! Quote event types.

use serde::{Deserialize, Serialize};

/// Events emitted by the quote service after successful mutations.
///
/// These events represent facts about the collection. Front ends translate
/// them into notifications and refresh the category list and displayed quote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuoteEvent {
    /// A quote was added through the local form or command.
    QuoteAdded { text: String, category: String },

    /// An import file was accepted.
    QuotesImported { added: usize, skipped: usize },

    /// A remote record was not present locally and has been appended.
    NewQuoteFromServer { text: String },

    /// A sync cycle finished merging remote records.
    QuotesSynced { added: usize },
}

impl QuoteEvent {
    /// Creates a QuoteAdded event.
    pub fn quote_added(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self::QuoteAdded {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Creates a QuotesImported event.
    pub fn quotes_imported(added: usize, skipped: usize) -> Self {
        Self::QuotesImported { added, skipped }
    }

    /// Creates a NewQuoteFromServer event.
    pub fn new_quote_from_server(text: impl Into<String>) -> Self {
        Self::NewQuoteFromServer { text: text.into() }
    }

    /// Creates a QuotesSynced event.
    pub fn quotes_synced(added: usize) -> Self {
        Self::QuotesSynced { added }
    }

    /// Human-readable notification text for this event.
    pub fn message(&self) -> String {
        match self {
            QuoteEvent::QuoteAdded { .. } => "Quote added successfully!".to_string(),
            QuoteEvent::QuotesImported { added, skipped } => format!(
                "Quotes imported successfully! ({} added, {} skipped)",
                added, skipped
            ),
            QuoteEvent::NewQuoteFromServer { text } => {
                format!("New quote from server: \"{}\"", text)
            }
            QuoteEvent::QuotesSynced { .. } => "Quotes synced with server!".to_string(),
        }
    }

    /// Whether the displayed quote and category list should be refreshed.
    pub fn changes_collection(&self) -> bool {
        match self {
            QuoteEvent::QuoteAdded { .. } | QuoteEvent::NewQuoteFromServer { .. } => true,
            QuoteEvent::QuotesImported { added, .. } | QuoteEvent::QuotesSynced { added } => {
                *added > 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_event_serialization() {
        let event = QuoteEvent::new_quote_from_server("A");

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("new_quote_from_server"));

        let deserialized: QuoteEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            QuoteEvent::new_quote_from_server("A").message(),
            "New quote from server: \"A\""
        );
        assert_eq!(
            QuoteEvent::quotes_synced(0).message(),
            "Quotes synced with server!"
        );
    }

    #[test]
    fn test_empty_sync_does_not_change_collection() {
        assert!(!QuoteEvent::quotes_synced(0).changes_collection());
        assert!(QuoteEvent::quotes_synced(2).changes_collection());
        assert!(QuoteEvent::quote_added("t", "c").changes_collection());
    }
}
