//! The load → normalize → aggregate pipeline for one screen activation.

use tracing::debug;

use crate::aggregate::{CategoryCount, count_by_category, filter_by_category, select_featured};
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::CanonicalBook;
use crate::normalizer::Normalizer;
use crate::source::CatalogSource;
use crate::view::HomeSummary;

/// A normalized catalog snapshot. Immutable once built; safe to share
/// between threads and to aggregate from several places at once.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<CanonicalBook>,
}

impl Catalog {
    /// Load every record from `source` and normalize it. Only the load can
    /// fail; on failure nothing is normalized.
    pub fn load(source: &dyn CatalogSource, normalizer: &Normalizer) -> Result<Self> {
        let records = source.load()?;
        debug!(source = source.name(), records = records.len(), "catalog loaded");
        Ok(Self {
            books: normalizer.normalize_all(&records),
        })
    }

    #[cfg(feature = "async")]
    pub async fn load_async(
        source: &dyn crate::source::AsyncCatalogSource,
        normalizer: &Normalizer,
    ) -> Result<Self> {
        let records = source.load().await?;
        debug!(source = source.name(), records = records.len(), "catalog loaded");
        Ok(Self {
            books: normalizer.normalize_all(&records),
        })
    }

    pub fn books(&self) -> &[CanonicalBook] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn featured(&self, limit: usize) -> &[CanonicalBook] {
        select_featured(&self.books, limit)
    }

    pub fn category_counts(&self) -> CategoryCount {
        count_by_category(&self.books)
    }

    pub fn by_category<'a>(&'a self, name: &'a str) -> Vec<&'a CanonicalBook> {
        filter_by_category(&self.books, name).collect()
    }

    /// First book whose identifier matches. Identifiers are compared by
    /// display form, so `"12"` finds both `12` and `"12"`.
    pub fn find(&self, identifier: &str) -> Option<&CanonicalBook> {
        self.books
            .iter()
            .find(|b| b.identifier.to_string() == identifier)
    }

    pub fn home(&self, config: &AppConfig) -> HomeSummary {
        HomeSummary::build(&self.books, config)
    }
}
