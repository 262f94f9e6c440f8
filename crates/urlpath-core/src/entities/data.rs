use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::CoreError;

/// Manual URL path supplied by the caller.
pub const PATH_VALUE_FIELD: &str = "path_value";

/// Caller asks for a pattern-generated path instead of a manual one.
pub const PATH_GENERATED_FIELD: &str = "path_generated";

/// Reference to the entity's path record.
pub const URL_PATH_ID_FIELD: &str = "url_path_id";

/// Loose truthiness of a JSON value, as editors submit it.
///
/// `null`, `false`, `0` and `""` are falsy. Everything else is truthy.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Field data of a content entity or of a (possibly partial) mutation payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct EntityData(Map<String, Value>);

impl EntityData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotAnObject` for any non-object value.
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let found = match value {
            Value::Object(map) => return Ok(Self(map)),
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
        };
        Err(CoreError::NotAnObject { found })
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The manual path value, if a non-empty string was supplied.
    #[must_use]
    pub fn path_value(&self) -> Option<&str> {
        self.0
            .get(PATH_VALUE_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Whether the payload requests a generated path.
    #[must_use]
    pub fn path_generated(&self) -> bool {
        self.0.get(PATH_GENERATED_FIELD).is_some_and(is_truthy)
    }

    /// The manual path to use: a non-empty `path_value` without a generation request.
    #[must_use]
    pub fn manual_path(&self) -> Option<&str> {
        if self.path_generated() {
            None
        } else {
            self.path_value()
        }
    }

    /// Whether the payload says anything about the path at all.
    #[must_use]
    pub fn specifies_path(&self) -> bool {
        self.path_generated() || self.path_value().is_some()
    }

    /// The referenced path record ID, if set to a non-empty string.
    #[must_use]
    pub fn url_path_id(&self) -> Option<&str> {
        self.0
            .get(URL_PATH_ID_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn set_url_path_id(&mut self, id: impl Into<String>) {
        self.0
            .insert(URL_PATH_ID_FIELD.to_string(), Value::String(id.into()));
    }

    /// Remove and return the path record reference.
    pub fn take_url_path_id(&mut self) -> Option<String> {
        match self.0.remove(URL_PATH_ID_FIELD) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Shallow merge: fields of `patch` overwrite fields of `self`.
    #[must_use]
    pub fn merged_with(&self, patch: &Self) -> Self {
        let mut merged = self.0.clone();
        for (k, v) in &patch.0 {
            merged.insert(k.clone(), v.clone());
        }
        Self(merged)
    }

    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for EntityData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<EntityData> for Value {
    fn from(data: EntityData) -> Self {
        Self::Object(data.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn data(value: Value) -> EntityData {
        EntityData::from_value(value).unwrap()
    }

    #[test]
    fn rejects_non_object() {
        assert_eq!(
            EntityData::from_value(json!([1, 2])).unwrap_err(),
            CoreError::NotAnObject { found: "array" }
        );
        assert!(EntityData::from_value(json!("x")).is_err());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn manual_path_needs_value_and_no_generation() {
        assert_eq!(data(json!({"path_value": "/foo"})).manual_path(), Some("/foo"));
        assert_eq!(
            data(json!({"path_value": "/foo", "path_generated": false})).manual_path(),
            Some("/foo")
        );
        assert_eq!(
            data(json!({"path_value": "/foo", "path_generated": true})).manual_path(),
            None
        );
        assert_eq!(data(json!({"path_value": ""})).manual_path(), None);
        assert_eq!(data(json!({"path_value": null})).manual_path(), None);
        assert_eq!(data(json!({"title": "x"})).manual_path(), None);
    }

    #[test]
    fn specifies_path() {
        assert!(!data(json!({"title": "x"})).specifies_path());
        assert!(!data(json!({"path_value": "", "path_generated": false})).specifies_path());
        assert!(data(json!({"path_generated": true})).specifies_path());
        assert!(data(json!({"path_value": "/a"})).specifies_path());
    }

    #[test]
    fn url_path_id_accessors() {
        let mut d = data(json!({"title": "x", "url_path_id": ""}));
        assert_eq!(d.url_path_id(), None);
        d.set_url_path_id("pth-1");
        assert_eq!(d.url_path_id(), Some("pth-1"));
        assert_eq!(d.take_url_path_id(), Some("pth-1".to_string()));
        assert!(!d.contains(URL_PATH_ID_FIELD));
    }

    #[test]
    fn merge_overwrites_shallowly() {
        let stored = data(json!({"title": "old", "body": "b", "meta": {"a": 1}}));
        let patch = data(json!({"title": "new", "meta": {"b": 2}}));
        let merged = stored.merged_with(&patch);
        assert_eq!(
            Value::from(merged),
            json!({"title": "new", "body": "b", "meta": {"b": 2}})
        );
    }
}
