//! The data mapping handed to an output handler.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DomainError;

/// String-keyed mapping of structured values.
///
/// Values may be strings, numbers, booleans, null, sequences or nested
/// mappings. Handlers pass it through to their engine untouched; nothing
/// here constrains its shape beyond "top level is a mapping".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderData(Map<String, Value>);

impl RenderData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, returning the previous one under `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Merge `other` on top of `self`; keys in `other` win.
    pub fn extend(&mut self, other: RenderData) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RenderData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for RenderData {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::InvalidData(format!(
                "expected a mapping at the top level, found {}",
                kind_of(&other)
            ))),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_inserts_values() {
        let data = RenderData::new()
            .with("name", "World")
            .with("count", 3)
            .with("tags", json!(["a", "b"]));

        assert_eq!(data.len(), 3);
        assert_eq!(data.get("name"), Some(&json!("World")));
        assert_eq!(data.get("count"), Some(&json!(3)));
    }

    #[test]
    fn try_from_object() {
        let data = RenderData::try_from(json!({ "user": { "name": "ada" } })).unwrap();
        assert_eq!(data.get("user"), Some(&json!({ "name": "ada" })));
    }

    #[test]
    fn try_from_non_object_fails() {
        let err = RenderData::try_from(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, DomainError::InvalidData(msg) if msg.contains("sequence")));
        assert!(RenderData::try_from(json!("text")).is_err());
    }

    #[test]
    fn extend_overrides_existing_keys() {
        let mut base = RenderData::new().with("a", 1).with("b", 2);
        base.extend(RenderData::new().with("b", "two"));
        assert_eq!(base.get("a"), Some(&json!(1)));
        assert_eq!(base.get("b"), Some(&json!("two")));
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let data = RenderData::new().with("k", "v");
        assert_eq!(serde_json::to_value(&data).unwrap(), json!({ "k": "v" }));
    }
}
