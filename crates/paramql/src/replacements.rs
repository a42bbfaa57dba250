//! Named parameter mapping handed to the execution layer.

use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parameter name to bound value.
///
/// Serializes as a flat JSON object, which is what named-parameter drivers
/// expect next to the SQL text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Replacements(BTreeMap<String, Value>);

impl Replacements {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `value` under `key`, replacing any earlier binding.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Copy every binding of `other` into `self`; `other` wins on collision.
    pub fn merge(&mut self, other: &Replacements) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// Value bound under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is bound.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of bound parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate bindings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Unwrap into the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.0
    }

    /// Render as a `serde_json` object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| {
                    let json = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
                    (k.clone(), json)
                })
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl IntoIterator for Replacements {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_last_write_wins() {
        let mut a: Replacements = [("id", Value::int(1)), ("name", Value::str("a"))]
            .into_iter()
            .collect();
        let b: Replacements = [("id", Value::int(2))].into_iter().collect();
        a.merge(&b);
        assert_eq!(a.get("id"), Some(&Value::int(2)));
        assert_eq!(a.get("name"), Some(&Value::str("a")));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_to_json() {
        let r: Replacements = [
            ("ids", Value::Sequence(vec![Value::int(1), Value::int(2)])),
            ("active", Value::bool(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            r.to_json(),
            serde_json::json!({ "ids": [1, 2], "active": true })
        );
    }
}
