//! Wire-typed attribute values.

use std::collections::BTreeMap;

/// A string-keyed bag of wire values.
pub type WireStruct = BTreeMap<String, WireValue>;

/// A strongly-typed attribute value as it crosses the service boundary.
///
/// Exactly one of six kinds. Numbers are always double precision.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Explicit null.
    Null,
    /// Double-precision number.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Boolean.
    Bool(bool),
    /// Nested string-keyed structure.
    Struct(WireStruct),
    /// Ordered list.
    List(Vec<WireValue>),
}

impl WireValue {
    /// Builds a nested structure from key/value pairs.
    pub fn structure<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, WireValue)>,
    {
        WireValue::Struct(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Short name of this value's kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            WireValue::Null => "null",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
            WireValue::Bool(_) => "bool",
            WireValue::Struct(_) => "struct",
            WireValue::List(_) => "list",
        }
    }

    /// Get this value as a number, if it is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            WireValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get this value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for WireValue {
    fn from(b: bool) -> Self {
        WireValue::Bool(b)
    }
}

impl From<f64> for WireValue {
    fn from(n: f64) -> Self {
        WireValue::Number(n)
    }
}

impl From<i32> for WireValue {
    fn from(n: i32) -> Self {
        WireValue::Number(f64::from(n))
    }
}

impl From<&str> for WireValue {
    fn from(s: &str) -> Self {
        WireValue::String(s.to_string())
    }
}

impl From<String> for WireValue {
    fn from(s: String) -> Self {
        WireValue::String(s)
    }
}

impl<T: Into<WireValue>> From<Vec<T>> for WireValue {
    fn from(v: Vec<T>) -> Self {
        WireValue::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structure_builder() {
        let value = WireValue::structure([("a", WireValue::from(1)), ("b", WireValue::Null)]);
        match value {
            WireValue::Struct(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields["a"], WireValue::Number(1.0));
            }
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn from_impls() {
        assert_eq!(WireValue::from(true), WireValue::Bool(true));
        assert_eq!(WireValue::from(12), WireValue::Number(12.0));
        assert_eq!(WireValue::from("blue").as_str(), Some("blue"));
        assert_eq!(
            WireValue::from(vec![1, 2]),
            WireValue::List(vec![WireValue::Number(1.0), WireValue::Number(2.0)])
        );
        assert_eq!(WireValue::Null.kind_name(), "null");
    }
}
