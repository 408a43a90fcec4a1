//! Extension-owned metadata attached to verifications and fiscal years
//!
//! The core never reads these values. Extensions write them from their
//! creation hooks and read them back when reporting.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Key/value slot filled in by extensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, Value>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Stores a value, returning the previous one if any
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Deserializes the value stored under `key` into `T`
    ///
    /// Returns `None` if the key is absent or holds a different shape.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_previous_value() {
        let mut metadata = Metadata::new();
        assert!(metadata.insert("owners", json!({"John": 1.0})).is_none());
        let previous = metadata.insert("owners", json!({"Jane": 1.0}));
        assert_eq!(previous, Some(json!({"John": 1.0})));
    }

    #[test]
    fn test_get_as_typed() {
        let mut metadata = Metadata::new();
        metadata.insert("tags", json!(["a", "b"]));
        let tags: Vec<String> = metadata.get_as("tags").unwrap();
        assert_eq!(tags, vec!["a", "b"]);
        assert!(metadata.get_as::<u32>("tags").is_none());
    }
}
