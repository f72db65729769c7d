//! Derived views over a normalized catalog.
//!
//! All of these are pure reads over `&[CanonicalBook]`; nothing is reordered
//! or mutated.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::CanonicalBook;

/// Exact-match category name → number of books.
pub type CategoryCount = BTreeMap<String, usize>;

/// The first `min(limit, len)` books, in source order.
pub fn select_featured(books: &[CanonicalBook], limit: usize) -> &[CanonicalBook] {
    &books[..limit.min(books.len())]
}

/// Count books per category. Books without a category are left out entirely.
pub fn count_by_category(books: &[CanonicalBook]) -> CategoryCount {
    let mut counts = CategoryCount::new();
    for category in books.iter().filter_map(|b| b.category.as_deref()) {
        *counts.entry(category.to_string()).or_default() += 1;
    }
    counts
}

pub fn is_available(book: &CanonicalBook) -> bool {
    book.is_available()
}

/// Books whose category equals `name` exactly, in source order.
pub fn filter_by_category<'a>(
    books: &'a [CanonicalBook],
    name: &'a str,
) -> impl Iterator<Item = &'a CanonicalBook> + 'a {
    books.iter().filter(move |b| b.has_category(name))
}

// ─── Category tiles ────────────────────────────────────────

/// A fixed category shown on the home screen with its book count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTile {
    pub name: String,
    pub count: usize,
}

/// One tile per configured name, in the configured order. Names that no book
/// carries still get a tile with a count of 0.
pub fn category_tiles<S: AsRef<str>>(books: &[CanonicalBook], names: &[S]) -> Vec<CategoryTile> {
    let counts = count_by_category(books);
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            CategoryTile {
                name: name.to_string(),
                count: counts.get(name).copied().unwrap_or(0),
            }
        })
        .collect()
}
