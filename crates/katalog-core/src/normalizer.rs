//! Raw record → `CanonicalBook`.
//!
//! Normalization is total: missing fields fall back to defaults and values of
//! the wrong type are coerced to a safe default. Nothing here returns an
//! error, since one malformed catalog entry must not take a screen down.

use serde_json::Value;
use tracing::{debug, trace};

use crate::alias::{AliasTable, Attribute};
use crate::models::{BookId, CanonicalBook, RawRecord};
use crate::resolver::resolve_with_alias;

pub const TITLE_UNAVAILABLE: &str = "title unavailable";
pub const AUTHOR_UNAVAILABLE: &str = "author unavailable";

/// Applies an alias table and sentinel strings to raw records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: AliasTable,
    title_unavailable: String,
    author_unavailable: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(AliasTable::default())
    }
}

impl Normalizer {
    pub fn new(aliases: AliasTable) -> Self {
        Self {
            aliases,
            title_unavailable: TITLE_UNAVAILABLE.to_string(),
            author_unavailable: AUTHOR_UNAVAILABLE.to_string(),
        }
    }

    pub fn with_sentinels(mut self, title: impl Into<String>, author: impl Into<String>) -> Self {
        self.title_unavailable = title.into();
        self.author_unavailable = author.into();
        self
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Normalize one record. `index` is the record's position in its batch and
    /// only matters when the record has no identifier field.
    pub fn normalize(&self, record: &RawRecord, index: usize) -> CanonicalBook {
        let identifier = match self.lookup(record, Attribute::Identifier) {
            Some(value) => identifier_from(value),
            None => {
                trace!(index, "no identifier field, using position");
                BookId::positional(index)
            }
        };

        let title = self
            .lookup(record, Attribute::Title)
            .and_then(text_from)
            .unwrap_or_else(|| self.title_unavailable.clone());

        let author = self
            .lookup(record, Attribute::Author)
            .and_then(text_from)
            .unwrap_or_else(|| self.author_unavailable.clone());

        let available_count = match self.lookup(record, Attribute::Stock) {
            Some(value) => stock_from(value).unwrap_or_else(|| {
                trace!(index, %value, "stock is not a non-negative integer, clamping to 0");
                0
            }),
            None => 0,
        };

        let category = self
            .lookup(record, Attribute::Category)
            .and_then(Value::as_str)
            .map(str::to_string);

        CanonicalBook {
            identifier,
            title,
            author,
            available_count,
            category,
            extra: record.clone(),
        }
    }

    /// Normalize a whole batch, using each record's position as its fallback
    /// identifier.
    pub fn normalize_all(&self, records: &[RawRecord]) -> Vec<CanonicalBook> {
        let books: Vec<CanonicalBook> = records
            .iter()
            .enumerate()
            .map(|(index, record)| self.normalize(record, index))
            .collect();
        debug!(count = books.len(), "normalized catalog records");
        books
    }

    fn lookup<'r>(&self, record: &'r RawRecord, attribute: Attribute) -> Option<&'r Value> {
        resolve_with_alias(record, self.aliases.aliases(attribute)).map(|(alias, value)| {
            trace!(%attribute, alias, "resolved field");
            value
        })
    }
}

/// Normalize with the built-in alias table and sentinels.
pub fn normalize(record: &RawRecord, index: usize) -> CanonicalBook {
    Normalizer::default().normalize(record, index)
}

// ─── Coercion ──────────────────────────────────────────────

/// A present identifier never falls back to the position: strings and
/// integers are used as-is, anything else is kept as its JSON text.
fn identifier_from(value: &Value) -> BookId {
    match value {
        Value::String(s) => BookId::Text(s.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(i) => BookId::Number(i),
            None => BookId::Text(n.to_string()),
        },
        other => BookId::Text(other.to_string()),
    }
}

fn text_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `None` for anything other than a non-negative JSON integer.
fn stock_from(value: &Value) -> Option<u64> {
    value.as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        RawRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_indonesian_schema_record() {
        let raw = record(json!({"judul": "Laskar Pelangi", "stok": 3, "kategori": "Fiksi"}));
        let book = normalize(&raw, 0);
        assert_eq!(book.title, "Laskar Pelangi");
        assert_eq!(book.author, AUTHOR_UNAVAILABLE);
        assert_eq!(book.available_count, 3);
        assert_eq!(book.category.as_deref(), Some("Fiksi"));
        assert!(book.is_available());
    }

    #[test]
    fn test_negative_stock_clamped() {
        let book = normalize(&record(json!({"title": "X", "available": -5})), 0);
        assert_eq!(book.title, "X");
        assert_eq!(book.available_count, 0);
        assert!(!book.is_available());
    }

    #[test]
    fn test_non_integer_stock_clamped() {
        for stock in [json!("7"), json!(2.5), json!(true), Value::Null, json!([1])] {
            let book = normalize(&record(json!({"stok": stock})), 0);
            assert_eq!(book.available_count, 0);
        }
    }

    #[test]
    fn test_zero_stock_does_not_fall_through() {
        let book = normalize(&record(json!({"stok": 0, "available": 4})), 0);
        assert_eq!(book.available_count, 0);
    }

    #[test]
    fn test_positional_identifier_only_when_no_alias_present() {
        let book = normalize(&record(json!({"judul": "Ayat-Ayat Cinta"})), 7);
        assert_eq!(book.identifier, BookId::Number(7));

        let book = normalize(&record(json!({"id_buku": "BK-01"})), 7);
        assert_eq!(book.identifier, BookId::Text("BK-01".to_string()));

        let book = normalize(&record(json!({"idBuku": 0})), 7);
        assert_eq!(book.identifier, BookId::Number(0));

        let book = normalize(&record(json!({"id": null})), 7);
        assert_eq!(book.identifier, BookId::Text("null".to_string()));
    }

    #[test]
    fn test_non_string_non_integer_identifier_kept_as_text() {
        let book = normalize(&record(json!({"id": 2.5})), 7);
        assert_eq!(book.identifier, BookId::Text("2.5".to_string()));

        let book = normalize(&record(json!({"id_buku": true})), 7);
        assert_eq!(book.identifier, BookId::Text("true".to_string()));

        let book = normalize(&record(json!({"idBuku": ["a"]})), 7);
        assert_eq!(book.identifier, BookId::Text("[\"a\"]".to_string()));
    }

    #[test]
    fn test_identifier_priority() {
        let book = normalize(&record(json!({"idBuku": 3, "id": 1, "id_buku": 2})), 0);
        assert_eq!(book.identifier, BookId::Number(1));
    }

    #[test]
    fn test_title_and_author_fallbacks() {
        let book = normalize(&record(json!({"namaBuku": "Perahu Kertas", "penulis": "Dee"})), 0);
        assert_eq!(book.title, "Perahu Kertas");
        assert_eq!(book.author, "Dee");

        let book = normalize(&record(json!({})), 0);
        assert_eq!(book.title, TITLE_UNAVAILABLE);
        assert_eq!(book.author, AUTHOR_UNAVAILABLE);
    }

    #[test]
    fn test_non_text_title_uses_sentinel() {
        let book = normalize(&record(json!({"judul": null, "title": "Ignored"})), 0);
        assert_eq!(book.title, TITLE_UNAVAILABLE);

        let book = normalize(&record(json!({"judul": 1984})), 0);
        assert_eq!(book.title, "1984");
    }

    #[test]
    fn test_category_absent_not_sentinel() {
        let book = normalize(&record(json!({"judul": "Sang Pemimpi"})), 0);
        assert_eq!(book.category, None);

        let book = normalize(&record(json!({"kategori": 5})), 0);
        assert_eq!(book.category, None);

        let book = normalize(&record(json!({"category": "Sains"})), 0);
        assert_eq!(book.category.as_deref(), Some("Sains"));
    }

    #[test]
    fn test_empty_category_is_present() {
        let books = Normalizer::default().normalize_all(&[
            record(json!({"judul": "A", "kategori": ""})),
            record(json!({"judul": "B", "kategori": ""})),
            record(json!({"judul": "C"})),
        ]);
        assert_eq!(books[0].category.as_deref(), Some(""));
        assert_eq!(books[2].category, None);

        let counts = crate::aggregate::count_by_category(&books);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(""), Some(&2));
    }

    #[test]
    fn test_extra_keeps_original_record() {
        let raw = record(json!({"judul": "Pulang", "penerbit": "Republika", "tahun": 2015}));
        let book = normalize(&raw, 0);
        assert_eq!(book.extra, raw);
        assert_eq!(book.extra.get("penerbit"), Some(&json!("Republika")));
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = record(json!({"id": "A1", "judul": "Gadis Kretek", "stok": 2}));
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize(&raw, 0), normalizer.normalize(&raw, 0));
        // Identifier present, so position is irrelevant.
        assert_eq!(normalizer.normalize(&raw, 0), normalizer.normalize(&raw, 9));
    }

    #[test]
    fn test_normalize_all_uses_positions() {
        let records = vec![
            record(json!({"judul": "A"})),
            record(json!({"id": 100, "judul": "B"})),
            record(json!({"judul": "C"})),
        ];
        let books = Normalizer::default().normalize_all(&records);
        let ids: Vec<BookId> = books.into_iter().map(|b| b.identifier).collect();
        assert_eq!(ids, vec![BookId::Number(0), BookId::Number(100), BookId::Number(2)]);
    }

    #[test]
    fn test_custom_aliases_and_sentinels() {
        let aliases = AliasTable {
            stock: vec!["qty".to_string()],
            ..Default::default()
        };
        let normalizer = Normalizer::new(aliases).with_sentinels("Judul tidak tersedia", "Pengarang tidak tersedia");
        let book = normalizer.normalize(&record(json!({"qty": 5, "stok": 1})), 0);
        assert_eq!(book.available_count, 5);
        assert_eq!(book.title, "Judul tidak tersedia");
        assert_eq!(book.author, "Pengarang tidak tersedia");
    }
}
