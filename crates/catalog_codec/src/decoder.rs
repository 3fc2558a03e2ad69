//! Canonical CBOR decoder for stored documents.

use crate::error::{CodecError, CodecResult};
use crate::value::Value;
use std::cmp::Ordering;

/// Decode exactly one value from CBOR bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid canonical CBOR, contain
/// forbidden constructs (NaN, indefinite-length items, non-double floats),
/// or continue past the end of the value.
pub fn from_cbor(bytes: &[u8]) -> CodecResult<Value> {
    let mut decoder = CanonicalDecoder::new(bytes);
    let value = decoder.decode()?;
    if !decoder.is_empty() {
        return Err(CodecError::TrailingBytes {
            remaining: decoder.remaining().len(),
        });
    }
    Ok(value)
}

/// A canonical CBOR decoder.
///
/// Validates that input follows the same rules the encoder applies.
pub struct CanonicalDecoder<'a> {
    data: &'a [u8],
    pos: usize,
}

/// Maximum allowed element count for arrays and maps.
const MAX_CONTAINER_ELEMENTS: u64 = 16 * 1024 * 1024;

/// Maximum allowed byte/string length.
const MAX_BYTES_LENGTH: u64 = 256 * 1024 * 1024;

impl<'a> CanonicalDecoder<'a> {
    /// Create a new decoder for the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Decode the next value.
    pub fn decode(&mut self) -> CodecResult<Value> {
        let initial_byte = self.read_byte()?;
        let major_type = initial_byte >> 5;
        let additional_info = initial_byte & 0x1f;

        match major_type {
            0 => {
                let n = self.decode_unsigned(additional_info)?;
                i64::try_from(n)
                    .map(Value::Integer)
                    .map_err(|_| CodecError::IntegerOverflow)
            }
            1 => {
                let n = self.decode_unsigned(additional_info)?;
                i64::try_from(n)
                    .map(|n| Value::Integer(-1 - n))
                    .map_err(|_| CodecError::IntegerOverflow)
            }
            2 => {
                let bytes = self.decode_payload(additional_info)?;
                Ok(Value::Bytes(bytes.to_vec()))
            }
            3 => {
                let bytes = self.decode_payload(additional_info)?;
                let text = std::str::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)?;
                Ok(Value::Text(text.to_string()))
            }
            4 => self.decode_array(additional_info),
            5 => self.decode_map(additional_info),
            6 => Err(CodecError::unsupported_type("tagged value")),
            _ => self.decode_simple(additional_info),
        }
    }

    /// Check if all bytes have been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..]
    }

    #[inline]
    fn read_byte(&mut self) -> CodecResult<u8> {
        let byte = *self.data.get(self.pos).ok_or(CodecError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_bytes(&mut self, len: usize) -> CodecResult<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(CodecError::UnexpectedEof)?;
        let bytes = self.data.get(self.pos..end).ok_or(CodecError::UnexpectedEof)?;
        self.pos = end;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    fn decode_unsigned(&mut self, additional_info: u8) -> CodecResult<u64> {
        let (value, fits_shorter) = match additional_info {
            0..=23 => return Ok(u64::from(additional_info)),
            24 => {
                let v = u64::from(self.read_byte()?);
                (v, v < 24)
            }
            25 => {
                let v = u64::from(u16::from_be_bytes(self.read_array()?));
                (v, v <= u64::from(u8::MAX))
            }
            26 => {
                let v = u64::from(u32::from_be_bytes(self.read_array()?));
                (v, v <= u64::from(u16::MAX))
            }
            27 => {
                let v = u64::from_be_bytes(self.read_array()?);
                (v, v <= u64::from(u32::MAX))
            }
            31 => return Err(CodecError::IndefiniteLengthForbidden),
            _ => return Err(CodecError::invalid_structure("reserved additional info")),
        };
        if fits_shorter {
            return Err(CodecError::invalid_structure(
                "non-canonical: value could be encoded in fewer bytes",
            ));
        }
        Ok(value)
    }

    fn decode_length(&mut self, additional_info: u8, max: u64) -> CodecResult<usize> {
        let len = self.decode_unsigned(additional_info)?;
        if len > max {
            return Err(CodecError::SizeLimitExceeded {
                claimed: len,
                max_allowed: max,
            });
        }
        usize::try_from(len).map_err(|_| CodecError::SizeLimitExceeded {
            claimed: len,
            max_allowed: max,
        })
    }

    fn decode_payload(&mut self, additional_info: u8) -> CodecResult<&'a [u8]> {
        let len = self.decode_length(additional_info, MAX_BYTES_LENGTH)?;
        self.read_bytes(len)
    }

    fn decode_array(&mut self, additional_info: u8) -> CodecResult<Value> {
        let len = self.decode_length(additional_info, MAX_CONTAINER_ELEMENTS)?;
        // Cap the preallocation: the claimed length is untrusted.
        let mut items = Vec::with_capacity(len.min(self.data.len() - self.pos));
        for _ in 0..len {
            items.push(self.decode()?);
        }
        Ok(Value::Array(items))
    }

    fn decode_map(&mut self, additional_info: u8) -> CodecResult<Value> {
        let len = self.decode_length(additional_info, MAX_CONTAINER_ELEMENTS)?;
        let mut pairs = Vec::with_capacity(len.min(self.data.len() - self.pos));
        let data = self.data;
        let mut prev_key: Option<&'a [u8]> = None;

        for _ in 0..len {
            let key_start = self.pos;
            let key = self.decode()?;
            let key_bytes = &data[key_start..self.pos];

            // Keys must be strictly increasing
            if let Some(prev) = prev_key {
                if compare_cbor_bytes(prev, key_bytes) != Ordering::Less {
                    return Err(CodecError::invalid_structure(
                        "non-canonical: map keys not in sorted order",
                    ));
                }
            }
            prev_key = Some(key_bytes);

            let value = self.decode()?;
            pairs.push((key, value));
        }

        Ok(Value::Map(pairs))
    }

    fn decode_simple(&mut self, additional_info: u8) -> CodecResult<Value> {
        match additional_info {
            20 => Ok(Value::Bool(false)),
            21 => Ok(Value::Bool(true)),
            22 => Ok(Value::Null),
            25 | 26 => Err(CodecError::invalid_structure(
                "non-canonical: floats must be double precision",
            )),
            27 => {
                let f = f64::from_bits(u64::from_be_bytes(self.read_array()?));
                if f.is_nan() {
                    return Err(CodecError::NaNForbidden);
                }
                Ok(Value::Float(f))
            }
            31 => Err(CodecError::invalid_structure("break without indefinite")),
            other => Err(CodecError::unsupported_type(format!("simple value {other}"))),
        }
    }
}

/// Compare two CBOR byte sequences for canonical ordering.
/// Uses length-first, then bytewise comparison.
fn compare_cbor_bytes(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::to_canonical_cbor;

    #[test]
    fn decode_simple_values() {
        assert_eq!(from_cbor(&[0xf6]).unwrap(), Value::Null);
        assert_eq!(from_cbor(&[0xf4]).unwrap(), Value::Bool(false));
        assert_eq!(from_cbor(&[0xf5]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn decode_integers() {
        assert_eq!(from_cbor(&[0x17]).unwrap(), Value::Integer(23));
        assert_eq!(from_cbor(&[0x18, 255]).unwrap(), Value::Integer(255));
        assert_eq!(from_cbor(&[0x19, 0x01, 0x00]).unwrap(), Value::Integer(256));
        assert_eq!(from_cbor(&[0x20]).unwrap(), Value::Integer(-1));
        assert_eq!(from_cbor(&[0x38, 99]).unwrap(), Value::Integer(-100));
    }

    #[test]
    fn decode_integer_overflow() {
        let mut bytes = vec![0x1b];
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        assert_eq!(from_cbor(&bytes), Err(CodecError::IntegerOverflow));
    }

    #[test]
    fn decode_double() {
        assert_eq!(
            from_cbor(&[0xfb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]).unwrap(),
            Value::Float(1.5)
        );
    }

    #[test]
    fn reject_short_floats_and_nan() {
        assert!(matches!(
            from_cbor(&[0xf9, 0x00, 0x00]),
            Err(CodecError::InvalidStructure { .. })
        ));
        assert!(matches!(
            from_cbor(&[0xfa, 0x00, 0x00, 0x00, 0x00]),
            Err(CodecError::InvalidStructure { .. })
        ));
        let mut nan = vec![0xfb];
        nan.extend_from_slice(&f64::NAN.to_bits().to_be_bytes());
        assert_eq!(from_cbor(&nan), Err(CodecError::NaNForbidden));
    }

    #[test]
    fn decode_text_and_bytes() {
        assert_eq!(from_cbor(&[0x60]).unwrap(), Value::Text(String::new()));
        assert_eq!(
            from_cbor(&[0x65, b'h', b'e', b'l', b'l', b'o']).unwrap(),
            Value::from("hello")
        );
        assert_eq!(
            from_cbor(&[0x43, 1, 2, 3]).unwrap(),
            Value::Bytes(vec![1, 2, 3])
        );
    }

    #[test]
    fn decode_containers() {
        assert_eq!(
            from_cbor(&[0x82, 0x01, 0x02]).unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );
        assert_eq!(
            from_cbor(&[0xa1, 0x61, b'a', 0x01]).unwrap(),
            Value::Map(vec![(Value::from("a"), Value::Integer(1))])
        );
    }

    #[test]
    fn reject_indefinite_length() {
        assert_eq!(
            from_cbor(&[0x7f, 0x61, b'a', 0xff]),
            Err(CodecError::IndefiniteLengthForbidden)
        );
        assert_eq!(
            from_cbor(&[0x9f, 0x01, 0xff]),
            Err(CodecError::IndefiniteLengthForbidden)
        );
    }

    #[test]
    fn reject_non_shortest_encoding() {
        assert!(matches!(
            from_cbor(&[0x18, 23]),
            Err(CodecError::InvalidStructure { .. })
        ));
        assert!(matches!(
            from_cbor(&[0x19, 0x00, 0xff]),
            Err(CodecError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn reject_unsorted_map_keys() {
        assert!(matches!(
            from_cbor(&[0xa2, 0x61, b'b', 0x01, 0x61, b'a', 0x02]),
            Err(CodecError::InvalidStructure { .. })
        ));
    }

    #[test]
    fn reject_trailing_bytes() {
        assert_eq!(
            from_cbor(&[0xf6, 0xf6]),
            Err(CodecError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn unexpected_eof() {
        assert_eq!(from_cbor(&[]), Err(CodecError::UnexpectedEof));
        assert_eq!(from_cbor(&[0x18]), Err(CodecError::UnexpectedEof));
        assert_eq!(from_cbor(&[0x82, 0x01]), Err(CodecError::UnexpectedEof));
    }

    #[test]
    fn invalid_utf8_rejected() {
        assert_eq!(from_cbor(&[0x62, 0xff, 0xfe]), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn encoded_document_decodes_back() {
        let doc = Value::text_map([
            ("uuid", Value::from("abc")),
            ("price", Value::Float(9.99)),
            (
                "attributes",
                Value::text_map([
                    ("color", Value::from("blue")),
                    ("tags", Value::Array(vec![Value::Bool(true), Value::Null])),
                ]),
            ),
        ]);
        let bytes = to_canonical_cbor(&doc).unwrap();
        assert_eq!(from_cbor(&bytes).unwrap(), doc);
    }
}
