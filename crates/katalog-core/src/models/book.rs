use serde::{Deserialize, Serialize};

use crate::models::RawRecord;

// ─── BookId ─────────────────────────────────────────────────

/// Identifier of a book within one normalization run.
///
/// Sources use either strings or integers. When a record carries no
/// identifier at all, the normalizer substitutes its position in the batch,
/// which is only meaningful for that batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BookId {
    Number(i64),
    Text(String),
}

impl BookId {
    pub fn positional(index: usize) -> Self {
        Self::Number(i64::try_from(index).unwrap_or(i64::MAX))
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for BookId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

// ─── CanonicalBook ──────────────────────────────────────────

/// A catalog entry resolved into its fixed shape.
///
/// `extra` keeps the whole source record, so fields that were never promoted
/// to a canonical attribute (publisher, year, cover photo, ...) stay reachable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalBook {
    pub identifier: BookId,
    pub title: String,
    pub author: String,
    pub available_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub extra: RawRecord,
}

impl CanonicalBook {
    /// Whether the availability badge should be shown.
    pub fn is_available(&self) -> bool {
        self.available_count > 0
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.category.as_deref() == Some(name)
    }
}

// ─── Tests ─────────────────────────────────────────────────
