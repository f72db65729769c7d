//! Declared alias-priority table.
//!
//! Each canonical attribute maps to an ordered list of source field names.
//! The order is the tie-break: when a record carries more than one alias for
//! the same attribute, the earliest listed one wins.

use serde::{Deserialize, Serialize};

use crate::error::{KatalogError, Result};

/// Canonical attributes that can be resolved from a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Identifier,
    Title,
    Author,
    Stock,
    Category,
    Publisher,
    Year,
    Photo,
}

impl Attribute {
    /// Attributes promoted onto `CanonicalBook`.
    pub const CANONICAL: [Attribute; 5] = [
        Self::Identifier,
        Self::Title,
        Self::Author,
        Self::Stock,
        Self::Category,
    ];
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Identifier => "identifier",
            Self::Title => "title",
            Self::Author => "author",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::Publisher => "publisher",
            Self::Year => "year",
            Self::Photo => "photo",
        };
        write!(f, "{s}")
    }
}

/// Ordered source field names per attribute. Loaded from the `[aliases]`
/// config section; missing keys fall back to the built-in lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasTable {
    pub identifier: Vec<String>,
    pub title: Vec<String>,
    pub author: Vec<String>,
    pub stock: Vec<String>,
    pub category: Vec<String>,
    pub publisher: Vec<String>,
    pub year: Vec<String>,
    pub photo: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            identifier: names(&["id", "id_buku", "idBuku"]),
            title: names(&["judul", "title", "namaBuku"]),
            author: names(&["pengarang", "author", "penulis"]),
            stock: names(&["stok", "available"]),
            category: names(&["kategori", "category"]),
            publisher: names(&["penerbit", "publisher"]),
            year: names(&["tahun", "tahunTerbit", "year"]),
            photo: names(&["photo", "cover"]),
        }
    }
}

impl AliasTable {
    pub fn aliases(&self, attribute: Attribute) -> &[String] {
        match attribute {
            Attribute::Identifier => &self.identifier,
            Attribute::Title => &self.title,
            Attribute::Author => &self.author,
            Attribute::Stock => &self.stock,
            Attribute::Category => &self.category,
            Attribute::Publisher => &self.publisher,
            Attribute::Year => &self.year,
            Attribute::Photo => &self.photo,
        }
    }

    /// Canonical attributes must have at least one alias; display
    /// attributes may be disabled with an empty list.
    pub fn validate(&self) -> Result<()> {
        for attribute in Attribute::CANONICAL {
            if self.aliases(attribute).is_empty() {
                return Err(KatalogError::ConfigError(format!(
                    "alias list for `{attribute}` must not be empty"
                )));
            }
        }
        Ok(())
    }
}
