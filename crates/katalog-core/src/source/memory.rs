use crate::error::Result;
use crate::models::RawRecord;

use super::CatalogSource;

/// A fixed collection of records, e.g. a bundled dataset or a test fixture.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    name: String,
    records: Vec<RawRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            name: "memory".to_string(),
            records,
        }
    }

    pub fn named(name: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }
}

impl CatalogSource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_returns_records_in_order() {
        let records = vec![
            RawRecord::from_value(json!({"judul": "A"})).unwrap(),
            RawRecord::from_value(json!({"judul": "B"})).unwrap(),
        ];
        let source = InMemorySource::new(records.clone());
        assert_eq!(source.name(), "memory");
        assert_eq!(source.load().unwrap(), records);
        // Loading twice yields the same data.
        assert_eq!(source.load().unwrap(), records);
    }

    #[test]
    fn test_named_source() {
        let source = InMemorySource::named("bundled", Vec::new());
        assert_eq!(source.name(), "bundled");
        assert!(source.load().unwrap().is_empty());
    }
}
