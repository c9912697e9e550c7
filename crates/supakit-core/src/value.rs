use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

/// One untyped row of a caller-named table: column name to JSON value.
///
/// No schema is imposed. Also used as the filter set for list queries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Record(pub HashMap<String, JsonValue>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Set a column value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Get a column value.
    pub fn get_value(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    /// Get a typed value from a column, returning None if missing or wrong type.
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.0
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// The `id` column rendered as a string, if present.
    pub fn id(&self) -> Option<String> {
        match self.0.get("id")? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// True when every column of `other` is present here with an equal value.
    pub fn is_superset_of(&self, other: &Record) -> bool {
        other
            .0
            .iter()
            .all(|(k, v)| self.0.get(k).is_some_and(|mine| mine == v))
    }

    /// Consume the record and return the inner HashMap.
    pub fn into_inner(self) -> HashMap<String, JsonValue> {
        self.0
    }
}

impl Deref for Record {
    type Target = HashMap<String, JsonValue>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(map)
    }
}

impl<K: Into<String>, V: Into<JsonValue>, const N: usize> From<[(K, V); N]> for Record {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

/// Macro for constructing a `Record` with key-value pairs.
///
/// # Examples
/// ```
/// use supakit_core::record;
/// let row = record![("title", "Buy milk"), ("done", false)];
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($(($key:expr, $val:expr)),+ $(,)?) => {{
        let mut record = $crate::Record::new();
        $(
            record.set($key, $crate::__private::serde_json::json!($val));
        )+
        record
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_set_get() {
        let mut row = Record::new();
        row.set("title", JsonValue::String("Buy milk".to_string()));
        assert_eq!(
            row.get_value("title"),
            Some(&JsonValue::String("Buy milk".to_string()))
        );
        assert!(row.get_value("missing").is_none());
    }

    #[test]
    fn test_record_macro() {
        let row = record![("title", "Buy milk"), ("id", 1)];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get_as::<i64>("id"), Some(1));
        assert_eq!(row.get_as::<String>("id"), None);
    }

    #[test]
    fn test_record_id_string_or_number() {
        assert_eq!(record![("id", "abc")].id().as_deref(), Some("abc"));
        assert_eq!(record![("id", 42)].id().as_deref(), Some("42"));
        assert_eq!(record![("id", true)].id(), None);
        assert_eq!(Record::new().id(), None);
    }

    #[test]
    fn test_superset() {
        let created = record![("id", 1), ("title", "x"), ("done", false)];
        assert!(created.is_superset_of(&record![("title", "x"), ("done", false)]));
        assert!(!created.is_superset_of(&record![("title", "y")]));
        assert!(!created.is_superset_of(&record![("missing", 1)]));
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let row = record![("title", "x")];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"title":"x"}"#);
    }
}
