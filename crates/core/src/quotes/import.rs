//! JSON import and export of the quote collection.
//!
//! Export writes the whole collection as a pretty-printed JSON array.
//! Import accepts the same shape. A payload that is not valid JSON, or is
//! valid JSON but not an array, is rejected as a whole. Inside an accepted
//! array, entries without a non-empty `text` and `category` string are
//! skipped, as are entries already present in the collection.

use serde::Serialize;
use serde_json::Value;

use super::model::Quote;
use super::store::QuoteBook;
use crate::errors::{ImportError, Result};

/// Default file name offered for exports.
pub const DEFAULT_EXPORT_FILE: &str = "quotes.json";

/// Entries decoded from an import payload, before applying them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportBatch {
    pub quotes: Vec<Quote>,
    /// Entries dropped because they were not complete quote objects.
    pub incomplete: usize,
}

/// Counts reported back to the user after an import.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub added: usize,
    pub duplicates: usize,
    pub incomplete: usize,
}

impl ImportResult {
    pub fn skipped(&self) -> usize {
        self.duplicates + self.incomplete
    }
}

/// Serializes the collection for download.
pub fn export_quotes(quotes: &[Quote]) -> Result<String> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Decodes an import payload.
pub fn parse_import(raw: &str) -> std::result::Result<ImportBatch, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

    let items = match value {
        Value::Array(items) => items,
        other => return Err(ImportError::NotAnArray(json_kind(&other))),
    };

    let mut batch = ImportBatch::default();
    for item in &items {
        match complete_quote(item) {
            Some(quote) => batch.quotes.push(quote),
            None => batch.incomplete += 1,
        }
    }
    Ok(batch)
}

/// Appends the new entries of `batch` to `book`.
pub fn apply_import(book: &mut QuoteBook, batch: ImportBatch) -> ImportResult {
    let mut result = ImportResult {
        incomplete: batch.incomplete,
        ..ImportResult::default()
    };

    for quote in batch.quotes {
        if book.contains(&quote) {
            result.duplicates += 1;
        } else {
            book.push(quote);
            result.added += 1;
        }
    }
    result
}

fn complete_quote(item: &Value) -> Option<Quote> {
    let text = item.get("text")?.as_str()?;
    let category = item.get("category")?.as_str()?;
    let quote = Quote::new(text, category);
    quote.is_complete().then_some(quote)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
