use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{KatalogError, Result};
use crate::models::RawRecord;

use super::CatalogSource;

/// A JSON file whose top level is an array of record objects.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<RawRecord>> {
        let contents = fs::read_to_string(&self.path)
            .map_err(|e| KatalogError::unavailable(&self.name, e))?;
        parse_records(&self.name, &contents)
    }
}

/// Parse a catalog document. Array entries that are not objects are skipped
/// with a warning; anything other than a top-level array is a failed load.
pub(crate) fn parse_records(source_name: &str, contents: &str) -> Result<Vec<RawRecord>> {
    let document: Value =
        serde_json::from_str(contents).map_err(|e| KatalogError::unavailable(source_name, e))?;

    let Value::Array(entries) = document else {
        return Err(KatalogError::unavailable(
            source_name,
            "expected a JSON array of records",
        ));
    };

    let total = entries.len();
    let mut records = Vec::with_capacity(total);
    for (position, entry) in entries.into_iter().enumerate() {
        match RawRecord::from_value(entry) {
            Some(record) => records.push(record),
            None => warn!(source = source_name, position, "skipping catalog entry that is not an object"),
        }
    }

    debug!(source = source_name, loaded = records.len(), total, "loaded catalog records");
    Ok(records)
}

#[cfg(feature = "async")]
mod async_source {
    use std::path::PathBuf;

    use crate::error::{KatalogError, Result};
    use crate::models::RawRecord;
    use crate::source::AsyncCatalogSource;

    use super::parse_records;

    /// Async variant of [`super::JsonFileSource`], reading with `tokio::fs`.
    #[derive(Debug, Clone)]
    pub struct AsyncJsonFileSource {
        path: PathBuf,
        name: String,
    }

    impl AsyncJsonFileSource {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            let name = path.display().to_string();
            Self { path, name }
        }
    }

    #[async_trait::async_trait]
    impl AsyncCatalogSource for AsyncJsonFileSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn load(&self) -> Result<Vec<RawRecord>> {
            let contents = tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|e| KatalogError::unavailable(&self.name, e))?;
            parse_records(&self.name, &contents)
        }
    }
}

#[cfg(feature = "async")]
pub use async_source::AsyncJsonFileSource;
