//! Plain-text rendering of quotes and the category list.

use quotebook_core::quotes::Quote;

pub const NO_QUOTES: &str = "No quotes available.";
pub const ALL_CATEGORIES: &str = "All Categories";

/// Renders the quote panel. `None` renders the empty-collection message.
pub fn quote_panel(quote: Option<&Quote>, last_viewed: bool) -> String {
    match quote {
        None => NO_QUOTES.to_string(),
        Some(quote) => {
            let marker = if last_viewed { " (Last viewed)" } else { "" };
            format!("\"{}\"\n  Category: {}{}", quote.text, quote.category, marker)
        }
    }
}

/// Renders the category selector with the active entry in brackets.
pub fn category_list(categories: &[String], active: &str) -> String {
    let mark = |name: &str, selected: bool| {
        if selected {
            format!("[{}]", name)
        } else {
            name.to_string()
        }
    };

    let mut entries = vec![mark(ALL_CATEGORIES, active.is_empty())];
    entries.extend(categories.iter().map(|c| mark(c, c == active)));
    format!("Categories: {}", entries.join(", "))
}
