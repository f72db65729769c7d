//! Catalog sources: where raw records come from.
//!
//! The pipeline takes a source as an explicit dependency. A failed load is
//! reported as `KatalogError::CatalogUnavailable`, and normalization is never
//! run on it.

mod json_file;
mod memory;

pub use json_file::JsonFileSource;
pub use memory::InMemorySource;

#[cfg(feature = "async")]
pub use json_file::AsyncJsonFileSource;

use crate::error::Result;
use crate::models::RawRecord;

pub trait CatalogSource {
    /// Human-readable name used in logs and error messages.
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<RawRecord>>;
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncCatalogSource: Send + Sync {
    fn name(&self) -> &str;
    async fn load(&self) -> Result<Vec<RawRecord>>;
}
