//! Canonical CBOR encoder for stored documents.

use crate::error::{CodecError, CodecResult};
use crate::value::Value;

/// Encode a value to canonical CBOR bytes.
///
/// Output is deterministic:
/// - Map keys are sorted by their encoded form (length-first, then bytewise)
/// - Integers use the shortest possible encoding
/// - Floats are always written as IEEE-754 doubles
/// - No indefinite-length encoding
///
/// # Errors
///
/// Returns [`CodecError::NaNForbidden`] if the value contains a NaN.
pub fn to_canonical_cbor(value: &Value) -> CodecResult<Vec<u8>> {
    let mut encoder = CanonicalEncoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

/// A canonical CBOR encoder.
pub struct CanonicalEncoder {
    buffer: Vec<u8>,
}

impl CanonicalEncoder {
    /// Create a new encoder.
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Encode a value.
    pub fn encode(&mut self, value: &Value) -> CodecResult<()> {
        match value {
            Value::Null => self.buffer.push(0xf6),
            Value::Bool(b) => self.buffer.push(if *b { 0xf5 } else { 0xf4 }),
            Value::Integer(n) => self.encode_integer(*n),
            Value::Float(f) => self.encode_float(*f)?,
            Value::Bytes(b) => {
                self.encode_unsigned(2, b.len() as u64);
                self.buffer.extend_from_slice(b);
            }
            Value::Text(s) => {
                self.encode_unsigned(3, s.len() as u64);
                self.buffer.extend_from_slice(s.as_bytes());
            }
            Value::Array(arr) => self.encode_array(arr)?,
            Value::Map(pairs) => self.encode_map(pairs)?,
        }
        Ok(())
    }

    /// Consume this encoder and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    #[allow(clippy::cast_sign_loss)]
    fn encode_integer(&mut self, n: i64) {
        if n >= 0 {
            self.encode_unsigned(0, n as u64);
        } else {
            // -1 encodes as 0, -2 as 1, and so on
            self.encode_unsigned(1, (-(n + 1)) as u64);
        }
    }

    fn encode_float(&mut self, f: f64) -> CodecResult<()> {
        if f.is_nan() {
            return Err(CodecError::NaNForbidden);
        }
        self.buffer.push(0xfb);
        self.buffer.extend_from_slice(&f.to_bits().to_be_bytes());
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn encode_unsigned(&mut self, major_type: u8, value: u64) {
        let mt = major_type << 5;

        if value < 24 {
            self.buffer.push(mt | (value as u8));
        } else if u8::try_from(value).is_ok() {
            self.buffer.push(mt | 24);
            self.buffer.push(value as u8);
        } else if u16::try_from(value).is_ok() {
            self.buffer.push(mt | 25);
            self.buffer.extend_from_slice(&(value as u16).to_be_bytes());
        } else if u32::try_from(value).is_ok() {
            self.buffer.push(mt | 26);
            self.buffer.extend_from_slice(&(value as u32).to_be_bytes());
        } else {
            self.buffer.push(mt | 27);
            self.buffer.extend_from_slice(&value.to_be_bytes());
        }
    }

    fn encode_array(&mut self, arr: &[Value]) -> CodecResult<()> {
        self.encode_unsigned(4, arr.len() as u64);
        for item in arr {
            self.encode(item)?;
        }
        Ok(())
    }

    fn encode_map(&mut self, pairs: &[(Value, Value)]) -> CodecResult<()> {
        let mut encoded_pairs: Vec<(Vec<u8>, &Value)> = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let mut key_encoder = CanonicalEncoder::new();
            key_encoder.encode(key)?;
            encoded_pairs.push((key_encoder.into_bytes(), value));
        }

        // Length-first, then bytewise
        encoded_pairs.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

        self.encode_unsigned(5, pairs.len() as u64);
        for (encoded_key, value) in encoded_pairs {
            self.buffer.extend_from_slice(&encoded_key);
            self.encode(value)?;
        }
        Ok(())
    }
}

impl Default for CanonicalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_simple_values() {
        assert_eq!(to_canonical_cbor(&Value::Null).unwrap(), vec![0xf6]);
        assert_eq!(to_canonical_cbor(&Value::Bool(false)).unwrap(), vec![0xf4]);
        assert_eq!(to_canonical_cbor(&Value::Bool(true)).unwrap(), vec![0xf5]);
    }

    #[test]
    fn encode_integers_shortest_form() {
        assert_eq!(to_canonical_cbor(&Value::Integer(23)).unwrap(), vec![0x17]);
        assert_eq!(
            to_canonical_cbor(&Value::Integer(255)).unwrap(),
            vec![0x18, 255]
        );
        assert_eq!(
            to_canonical_cbor(&Value::Integer(256)).unwrap(),
            vec![0x19, 0x01, 0x00]
        );
        assert_eq!(to_canonical_cbor(&Value::Integer(-1)).unwrap(), vec![0x20]);
        assert_eq!(
            to_canonical_cbor(&Value::Integer(-100)).unwrap(),
            vec![0x38, 99]
        );
    }

    #[test]
    fn encode_float_as_double() {
        // 1.5 = 0x3FF8000000000000
        assert_eq!(
            to_canonical_cbor(&Value::Float(1.5)).unwrap(),
            vec![0xfb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn encode_infinity_is_allowed() {
        let bytes = to_canonical_cbor(&Value::Float(f64::INFINITY)).unwrap();
        assert_eq!(bytes[0], 0xfb);
    }

    #[test]
    fn encode_nan_is_rejected() {
        assert_eq!(
            to_canonical_cbor(&Value::Float(f64::NAN)),
            Err(CodecError::NaNForbidden)
        );
        let nested = Value::text_map([("price", Value::Float(f64::NAN))]);
        assert_eq!(to_canonical_cbor(&nested), Err(CodecError::NaNForbidden));
    }

    #[test]
    fn encode_text_and_bytes() {
        assert_eq!(
            to_canonical_cbor(&Value::from("a")).unwrap(),
            vec![0x61, b'a']
        );
        assert_eq!(
            to_canonical_cbor(&Value::Bytes(vec![1, 2, 3])).unwrap(),
            vec![0x43, 1, 2, 3]
        );
    }

    #[test]
    fn encode_map_sorted() {
        let map = Value::Map(vec![
            (Value::from("bb"), Value::Integer(2)),
            (Value::from("a"), Value::Integer(1)),
        ]);
        let bytes = to_canonical_cbor(&map).unwrap();
        assert_eq!(bytes, vec![0xa2, 0x61, b'a', 0x01, 0x62, b'b', b'b', 0x02]);
    }

    #[test]
    fn deterministic_encoding() {
        let map1 = Value::Map(vec![
            (Value::from("z"), Value::Float(1.0)),
            (Value::from("a"), Value::Float(2.0)),
        ]);
        let map2 = Value::Map(vec![
            (Value::from("a"), Value::Float(2.0)),
            (Value::from("z"), Value::Float(1.0)),
        ]);
        assert_eq!(
            to_canonical_cbor(&map1).unwrap(),
            to_canonical_cbor(&map2).unwrap()
        );
    }
}
