//! Dynamic document value type.

use std::cmp::Ordering;

/// A dynamic document value.
///
/// This is the store-native representation of everything a document
/// holds, including the attribute bag of a record. The wire-representable
/// subset is {null, boolean, float, text, array, text-keyed map}; the
/// remaining kinds (integers, byte strings, maps keyed by non-text values)
/// can appear in documents written by other producers and are rejected by
/// [`crate::from_dynamic`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer (supports full i64 range).
    Integer(i64),
    /// Double-precision float.
    Float(f64),
    /// Byte string.
    Bytes(Vec<u8>),
    /// Text string (UTF-8).
    Text(String),
    /// Array of values.
    Array(Vec<Value>),
    /// Map of key-value pairs (keys are sorted for canonical encoding).
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Create a map value with sorted keys.
    ///
    /// Keys are sorted by their canonical CBOR encoding (bytewise comparison).
    pub fn map(mut pairs: Vec<(Value, Value)>) -> Self {
        pairs.sort_by(|a, b| a.0.cmp_canonical(&b.0));
        Value::Map(pairs)
    }

    /// Create a map value from text keys.
    pub fn text_map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::map(
            entries
                .into_iter()
                .map(|(k, v)| (Value::Text(k.into()), v))
                .collect(),
        )
    }

    /// Compare two values for canonical ordering.
    ///
    /// This implements the bytewise comparison of canonical CBOR encodings,
    /// which is required for map key sorting.
    #[allow(clippy::match_same_arms)]
    pub fn cmp_canonical(&self, other: &Self) -> Ordering {
        let self_type = self.major_type();
        let other_type = other.major_type();

        if self_type != other_type {
            return self_type.cmp(&other_type);
        }

        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Integer(a), Value::Integer(b)) => {
                // Positive (type 0) and negative (type 1) are already split by
                // major type, so both operands share a sign here.
                #[allow(clippy::cast_sign_loss)]
                if *a >= 0 {
                    Self::cmp_unsigned_canonical(*a as u64, *b as u64)
                } else {
                    // CBOR encodes negative n as argument -1 - n
                    let arg_a = (-1 - *a) as u64;
                    let arg_b = (-1 - *b) as u64;
                    Self::cmp_unsigned_canonical(arg_a, arg_b)
                }
            }
            (Value::Bytes(a), Value::Bytes(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => a.cmp(b),
                ord => ord,
            },
            (Value::Text(a), Value::Text(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => a.cmp(b),
                ord => ord,
            },
            (Value::Array(a), Value::Array(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => {
                    for (av, bv) in a.iter().zip(b.iter()) {
                        let ord = av.cmp_canonical(bv);
                        if ord != Ordering::Equal {
                            return ord;
                        }
                    }
                    Ordering::Equal
                }
                ord => ord,
            },
            (Value::Map(a), Value::Map(b)) => match a.len().cmp(&b.len()) {
                Ordering::Equal => {
                    for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
                        let key_ord = ak.cmp_canonical(bk);
                        if key_ord != Ordering::Equal {
                            return key_ord;
                        }
                        let val_ord = av.cmp_canonical(bv);
                        if val_ord != Ordering::Equal {
                            return val_ord;
                        }
                    }
                    Ordering::Equal
                }
                ord => ord,
            },
            // Simple values and floats share major type 7. Their encodings
            // are f4/f5/f6 (one byte) and fb + 8 bytes.
            (Value::Float(a), Value::Float(b)) => a.to_bits().cmp(&b.to_bits()),
            (Value::Float(_), _) => Ordering::Greater,
            (_, Value::Float(_)) => Ordering::Less,
            (Value::Bool(_), Value::Null) => Ordering::Less,
            (Value::Null, Value::Bool(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }

    /// Compare two unsigned integers by their canonical CBOR encoding.
    ///
    /// Comparison is length-first, then numeric (which equals lexicographic
    /// for big-endian arguments of the same length).
    fn cmp_unsigned_canonical(a: u64, b: u64) -> Ordering {
        let len_a = Self::cbor_uint_encoded_len(a);
        let len_b = Self::cbor_uint_encoded_len(b);

        match len_a.cmp(&len_b) {
            Ordering::Equal => a.cmp(&b),
            ord => ord,
        }
    }

    /// Returns the encoded length (in bytes) of an unsigned integer in CBOR.
    fn cbor_uint_encoded_len(n: u64) -> usize {
        if n <= 23 {
            1
        } else if n <= 0xFF {
            2
        } else if n <= 0xFFFF {
            3
        } else if n <= 0xFFFF_FFFF {
            5
        } else {
            9
        }
    }

    /// Get the CBOR major type for this value.
    fn major_type(&self) -> u8 {
        match self {
            Value::Integer(n) if *n >= 0 => 0,
            Value::Integer(_) => 1,
            Value::Bytes(_) => 2,
            Value::Text(_) => 3,
            Value::Array(_) => 4,
            Value::Map(_) => 5,
            Value::Bool(_) | Value::Null | Value::Float(_) => 7,
        }
    }

    /// Short name of this value's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Get this value as a string, if it is a text string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get this value as a map, if it is one.
    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Look up a text key in this map value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k.as_text() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}
