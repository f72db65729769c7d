use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One untyped catalog entry exactly as the source supplied it.
///
/// Field names vary with the source and schema version, so nothing about the
/// shape is assumed beyond "string keys to JSON values". A record is never
/// mutated after it is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Wrap a JSON value. Returns `None` unless the value is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_accepts_objects_only() {
        assert!(RawRecord::from_value(json!({"judul": "Ronggeng"})).is_some());
        assert!(RawRecord::from_value(json!(["judul"])).is_none());
        assert!(RawRecord::from_value(json!("judul")).is_none());
        assert!(RawRecord::from_value(Value::Null).is_none());
    }

    #[test]
    fn test_contains_key_ignores_value() {
        let record = RawRecord::from_value(json!({"stok": 0, "kategori": null})).unwrap();
        assert!(record.contains_key("stok"));
        assert!(record.contains_key("kategori"));
        assert!(!record.contains_key("available"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_transparent_json() {
        let record: RawRecord =
            serde_json::from_str(r#"{"id_buku": 12, "penerbit": "Bentang"}"#).unwrap();
        assert_eq!(record.get("id_buku"), Some(&json!(12)));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"id_buku": 12, "penerbit": "Bentang"}));
    }
}
