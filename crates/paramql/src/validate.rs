//! Best-effort screen for values that look like SQL injection attempts.
//!
//! Condition values are always bound as parameters, which is the real
//! protection. This screen only drops values that plainly carry statement
//! separators, comments or DML/DDL keywords.

use crate::value::{Scalar, Value};
use regex::Regex;
use std::sync::OnceLock;

fn keyword_re() -> &'static Regex {
    static KEYWORD_RE: OnceLock<Regex> = OnceLock::new();
    KEYWORD_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|TRUNCATE)\b")
            .expect("invalid built-in keyword regex")
    })
}

/// Returns `false` if `s` contains `;`, `--`, or one of the whole-word
/// keywords `SELECT`, `INSERT`, `UPDATE`, `DELETE`, `DROP`, `TRUNCATE`
/// (case-insensitive).
pub fn is_safe_string(s: &str) -> bool {
    !(s.contains(';') || s.contains("--") || keyword_re().is_match(s))
}

/// Returns `true` if `value` may be bound into a query.
///
/// - sequences: every element is a string or number scalar whose text is safe
/// - scalars: their text is safe
/// - temporal and absent values: always valid
/// - composites: valid when flat and every property is itself valid
pub fn is_valid_value(value: &Value) -> bool {
    match value {
        Value::Sequence(items) => items.iter().all(|item| match item {
            Value::Scalar(s) if s.is_string_or_number() => is_safe_scalar(s),
            _ => false,
        }),
        Value::Scalar(s) => is_safe_scalar(s),
        Value::Temporal(_) | Value::Absent => true,
        Value::Composite(map) => map
            .values()
            .all(|v| !v.is_composite() && is_valid_value(v)),
    }
}

fn is_safe_scalar(s: &Scalar) -> bool {
    match s {
        Scalar::Str(s) => is_safe_string(s),
        other => is_safe_string(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::value::Temporal;

    #[test]
    fn test_is_safe_string() {
        assert!(is_safe_string("alice"));
        assert!(is_safe_string("selection"));
        assert!(is_safe_string("selected"));
        assert!(is_safe_string("a-b"));
        assert!(!is_safe_string("select-box"));
        assert!(is_safe_string(""));

        assert!(!is_safe_string("a; b"));
        assert!(!is_safe_string("1 -- comment"));
        assert!(!is_safe_string("select * from t"));
        assert!(!is_safe_string("x' OR 1=1 UNION SeLeCt 1"));
        assert!(!is_safe_string("drop table x"));
        assert!(!is_safe_string("TRUNCATE"));
        assert!(!is_safe_string("(delete)"));
        assert!(!is_safe_string("insert"));
        assert!(!is_safe_string("Update"));
    }

    #[test]
    fn test_sequences_are_checked_element_wise() {
        let ok = Value::Sequence(vec![Value::str("a"), Value::int(2), Value::float(1.5)]);
        assert!(is_valid_value(&ok));

        let bad = Value::Sequence(vec![Value::str("a"), Value::str("a; DROP TABLE x")]);
        assert!(!is_valid_value(&bad));

        let with_bool = Value::Sequence(vec![Value::str("a"), Value::bool(true)]);
        assert!(!is_valid_value(&with_bool));

        let nested = Value::Sequence(vec![Value::Sequence(vec![Value::str("a")])]);
        assert!(!is_valid_value(&nested));

        let with_null = Value::Sequence(vec![Value::Absent]);
        assert!(!is_valid_value(&with_null));
    }

    #[test]
    fn test_temporal_and_absent_always_valid() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert!(is_valid_value(&Value::Temporal(Temporal::Date(d))));
        assert!(is_valid_value(&Value::Absent));
    }

    #[test]
    fn test_scalars() {
        assert!(is_valid_value(&Value::int(-5)));
        assert!(is_valid_value(&Value::bool(true)));
        assert!(is_valid_value(&Value::str("hello world")));
        assert!(!is_valid_value(&Value::str("1; DROP TABLE x")));
    }

    #[test]
    fn test_composites() {
        let flat = Value::composite([("start", Value::int(1)), ("end", Value::Absent)]);
        assert!(is_valid_value(&flat));

        let unsafe_property =
            Value::composite([("start", Value::int(1)), ("end", Value::str("x; y"))]);
        assert!(!is_valid_value(&unsafe_property));

        let only_unsafe = Value::composite([("start", Value::str("1; DROP TABLE x"))]);
        assert!(!is_valid_value(&only_unsafe));

        let nested = Value::composite([(
            "range",
            Value::composite([("start", Value::int(1))]),
        )]);
        assert!(!is_valid_value(&nested));
    }
}
