use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{CategoryTile, category_tiles, select_featured};
use crate::alias::{AliasTable, Attribute};
use crate::config::AppConfig;
use crate::models::{BookId, CanonicalBook};
use crate::resolver::resolve;

// ─── BookCardView (lightweight for list display) ───────────

/// What a book card on screen needs. Built from a `CanonicalBook`; the
/// publisher, year and cover are read from `extra` through the display aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCardView {
    pub identifier: BookId,
    pub title: String,
    pub author: String,
    pub available_count: u64,
    pub available: bool,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i64>,
    pub photo: Option<String>,
}

impl BookCardView {
    pub fn new(book: &CanonicalBook, aliases: &AliasTable) -> Self {
        let display = |attribute: Attribute| resolve(&book.extra, aliases.aliases(attribute));

        Self {
            identifier: book.identifier.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            available_count: book.available_count,
            available: book.is_available(),
            category: book.category.clone(),
            publisher: display(Attribute::Publisher)
                .and_then(Value::as_str)
                .map(str::to_string),
            year: display(Attribute::Year).and_then(year_from),
            photo: display(Attribute::Photo)
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

impl From<&CanonicalBook> for BookCardView {
    fn from(book: &CanonicalBook) -> Self {
        Self::new(book, &AliasTable::default())
    }
}

fn year_from(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => s.parse().ok(),
        _ => None,
    }
}

// ─── HomeSummary ───────────────────────────────────────────

/// Everything the home screen renders in one pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeSummary {
    pub total_books: usize,
    /// Lending is not tracked; always 0.
    pub borrowed: usize,
    /// Lending history is not tracked; always 0.
    pub history: usize,
    pub featured: Vec<BookCardView>,
    pub categories: Vec<CategoryTile>,
}

impl HomeSummary {
    pub fn build(books: &[CanonicalBook], config: &AppConfig) -> Self {
        let featured = select_featured(books, config.catalog.featured_limit)
            .iter()
            .map(|b| BookCardView::new(b, &config.aliases))
            .collect();

        Self {
            total_books: books.len(),
            borrowed: 0,
            history: 0,
            featured,
            categories: category_tiles(books, &config.display.category_tiles),
        }
    }
}
