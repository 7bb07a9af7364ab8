//! Additive reconciliation of remote records into the local collection.
//!
//! Remote never overwrites or removes a local record. Each remote record is
//! appended only when no record with the same text and category exists yet,
//! counting records appended earlier in the same batch.

use std::collections::HashSet;

use super::model::Quote;

/// Result of merging a remote batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Local records in original order, followed by the appended remote ones.
    pub quotes: Vec<Quote>,
    /// The remote records that were appended, in discovery order.
    pub added: Vec<Quote>,
}

impl MergeOutcome {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Merges `remote` into `local`.
pub fn merge(local: &[Quote], remote: &[Quote]) -> MergeOutcome {
    let mut known: HashSet<(&str, &str)> = local.iter().map(Quote::key).collect();
    let mut added = Vec::new();

    for quote in remote {
        if known.insert(quote.key()) {
            added.push(quote.clone());
        }
    }

    let mut quotes = Vec::with_capacity(local.len() + added.len());
    quotes.extend_from_slice(local);
    quotes.extend(added.iter().cloned());

    MergeOutcome { quotes, added }
}
