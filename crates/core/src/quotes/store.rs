//! In-memory quote collection.

use std::collections::HashSet;

use super::model::{seed_quotes, Quote};

/// Ordered, append-only collection of quotes.
///
/// Local additions may introduce exact duplicates; merge and import check
/// membership before appending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteBook {
    quotes: Vec<Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// The built-in three-quote collection.
    pub fn seeded() -> Self {
        Self::from_quotes(seed_quotes())
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn contains(&self, quote: &Quote) -> bool {
        self.quotes.iter().any(|q| q == quote)
    }

    pub fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.quotes
            .iter()
            .filter(|q| seen.insert(q.category.as_str()))
            .map(|q| q.category.clone())
            .collect()
    }

    /// Quotes in `category`; an empty category selects everything.
    pub fn filtered(&self, category: &str) -> Vec<&Quote> {
        self.quotes
            .iter()
            .filter(|q| category.is_empty() || q.category == category)
            .collect()
    }

    pub fn into_vec(self) -> Vec<Quote> {
        self.quotes
    }
}

impl<'a> IntoIterator for &'a QuoteBook {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_push_allows_duplicates() {
        let mut book = QuoteBook::new();
        book.push(Quote::new("A", "x"));
        book.push(Quote::new("A", "x"));
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_categories_are_unique_in_first_seen_order() {
        let book = QuoteBook::from_quotes(vec![
            Quote::new("1", "Life"),
            Quote::new("2", "Server"),
            Quote::new("3", "Life"),
            Quote::new("4", "Art"),
        ]);
        assert_eq!(book.categories(), vec!["Life", "Server", "Art"]);
    }

    #[test]
    fn test_empty_filter_selects_all() {
        let book = QuoteBook::seeded();
        assert_eq!(book.filtered("").len(), 3);

        let philosophy = book.filtered("Philosophy");
        assert_eq!(philosophy.len(), 1);
        assert_eq!(philosophy[0].text, "Simplicity is the soul of efficiency.");

        assert!(book.filtered("Unknown").is_empty());
    }
}
