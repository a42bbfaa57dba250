//! Field values read from a filter model.
//!
//! Every model field is read into a [`Value`], a closed set of shapes the
//! builder knows how to screen and bind. Conversions from ordinary Rust types
//! go through [`ToValue`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single non-composite value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    /// Returns `true` for string and numeric scalars (the only shapes allowed
    /// inside a sequence).
    pub fn is_string_or_number(&self) -> bool {
        !matches!(self, Scalar::Bool(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Temporal {
    DateTime(DateTime<Utc>),
    NaiveDateTime(NaiveDateTime),
    Date(NaiveDate),
}

/// The shape of a model field value.
///
/// `Absent` stands for both "not set" (`None`) and "no such field".
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Composite(BTreeMap<String, Value>),
    Temporal(Temporal),
    #[default]
    Absent,
}

impl Value {
    /// Build a string value.
    pub fn str(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    /// Build an integer value.
    pub fn int(n: i64) -> Self {
        Value::Scalar(Scalar::Int(n))
    }

    /// Build a float value.
    pub fn float(n: f64) -> Self {
        Value::Scalar(Scalar::Float(n))
    }

    /// Build a boolean value.
    pub fn bool(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }

    /// Build a composite value from `(key, value)` pairs.
    pub fn composite<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Composite(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Composite(_))
    }

    /// Returns the named property of a composite value.
    ///
    /// Missing properties and non-composite values yield `None`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Composite(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns `true` when the value counts as "not provided": absent, an
    /// empty string, an empty sequence, or boolean `false`.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Absent => true,
            Value::Scalar(Scalar::Str(s)) => s.is_empty(),
            Value::Scalar(Scalar::Bool(b)) => !b,
            Value::Sequence(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => fmt::Display::fmt(s, f),
            Value::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                Ok(())
            }
            Value::Composite(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Temporal(Temporal::DateTime(t)) => write!(f, "{}", t.to_rfc3339()),
            Value::Temporal(Temporal::NaiveDateTime(t)) => write!(f, "{t}"),
            Value::Temporal(Temporal::Date(d)) => write!(f, "{d}"),
            Value::Absent => f.write_str("null"),
        }
    }
}

/// Conversion of a model field into a [`Value`].
///
/// Implemented for the common scalar, collection and chrono types. Derive it
/// for small structs with `#[derive(ToValue)]` to get a composite value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::str(self.as_str())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::bool(*self)
    }
}

macro_rules! impl_to_value_int {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::int(i64::from(*self))
                }
            }
        )*
    };
}

impl_to_value_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_to_value_wide_int {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    match i64::try_from(*self) {
                        Ok(n) => Value::int(n),
                        Err(_) => Value::float(*self as f64),
                    }
                }
            }
        )*
    };
}

impl_to_value_wide_int!(u64, usize, isize);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::float(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Absent,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Composite(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl<T: ToValue, S> ToValue for HashMap<String, T, S> {
    fn to_value(&self) -> Value {
        Value::Composite(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::DateTime(*self))
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::NaiveDateTime(*self))
    }
}

impl ToValue for NaiveDate {
    fn to_value(&self) -> Value {
        Value::Temporal(Temporal::Date(*self))
    }
}

impl ToValue for uuid::Uuid {
    fn to_value(&self) -> Value {
        Value::str(self.to_string())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::int(i),
                None => Value::float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::str(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(ToValue::to_value).collect())
            }
            serde_json::Value::Object(map) => Value::Composite(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        value.to_value()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Str(s))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_absent() {
        let v: Option<String> = None;
        assert_eq!(v.to_value(), Value::Absent);
        assert_eq!(Some(5i32).to_value(), Value::int(5));
    }

    #[test]
    fn blank_values() {
        assert!(Value::Absent.is_blank());
        assert!(Value::str("").is_blank());
        assert!(Value::bool(false).is_blank());
        assert!(Value::Sequence(vec![]).is_blank());

        assert!(!Value::bool(true).is_blank());
        assert!(!Value::int(0).is_blank());
        assert!(!Value::str(" ").is_blank());
        assert!(!Value::composite(Vec::<(String, Value)>::new()).is_blank());
    }

    #[test]
    fn json_object_becomes_composite() {
        let v = serde_json::json!({ "start": 1, "end": 10, "note": null });
        let v = Value::from(v);
        assert_eq!(v.get("start"), Some(&Value::int(1)));
        assert_eq!(v.get("end"), Some(&Value::int(10)));
        assert_eq!(v.get("note"), Some(&Value::Absent));
        assert_eq!(v.get("missing"), None);
    }

    #[test]
    fn serializes_untagged() {
        let v = Value::Sequence(vec![Value::str("a"), Value::int(2), Value::Absent]);
        assert_eq!(serde_json::to_string(&v).unwrap(), r#"["a",2,null]"#);
    }

    #[test]
    fn wide_ints_fall_back_to_float() {
        assert_eq!(7u64.to_value(), Value::int(7));
        assert_eq!(u64::MAX.to_value(), Value::float(u64::MAX as f64));
    }

    #[test]
    fn uuid_is_string_scalar() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            id.to_value(),
            Value::str("00000000-0000-0000-0000-000000000000")
        );
    }
}
