//! Conversion between wire values and dynamic values.
//!
//! `to_dynamic` is total. `from_dynamic` rejects kinds the wire format
//! cannot carry and names the element that failed.

use crate::error::{CodecError, CodecResult};
use crate::path::ValuePath;
use crate::value::Value;
use crate::wire::{WireStruct, WireValue};
use std::collections::BTreeMap;

/// Attribute bag in dynamic form.
pub type Attributes = BTreeMap<String, Value>;

/// Largest integer magnitude a double represents exactly (2^53).
pub const MAX_EXACT_INTEGER: i64 = 1 << 53;

/// Converts a wire value into its dynamic representation.
pub fn to_dynamic(wire: &WireValue) -> Value {
    match wire {
        WireValue::Null => Value::Null,
        WireValue::Number(n) => Value::Float(*n),
        WireValue::String(s) => Value::Text(s.clone()),
        WireValue::Bool(b) => Value::Bool(*b),
        WireValue::List(items) => Value::Array(items.iter().map(to_dynamic).collect()),
        WireValue::Struct(fields) => Value::map(
            fields
                .iter()
                .map(|(k, v)| (Value::Text(k.clone()), to_dynamic(v)))
                .collect(),
        ),
    }
}

/// Converts a dynamic value back into a wire value.
///
/// The wire format has a single number kind, so an integer within ±2^53
/// becomes the equal [`WireValue::Number`]. Converting that back with
/// [`to_dynamic`] yields a [`Value::Float`], not the original
/// [`Value::Integer`]; every other representable kind round-trips to the
/// same variant.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedValueKind`] for byte strings, integers
/// beyond ±2^53 and maps with non-text keys. The error path is relative to
/// `value`.
pub fn from_dynamic(value: &Value) -> CodecResult<WireValue> {
    from_dynamic_at(value, &ValuePath::root())
}

#[allow(clippy::cast_precision_loss)]
fn from_dynamic_at(value: &Value, path: &ValuePath) -> CodecResult<WireValue> {
    match value {
        Value::Null => Ok(WireValue::Null),
        Value::Bool(b) => Ok(WireValue::Bool(*b)),
        Value::Float(f) => Ok(WireValue::Number(*f)),
        Value::Integer(n) if n.unsigned_abs() <= MAX_EXACT_INTEGER.unsigned_abs() => {
            Ok(WireValue::Number(*n as f64))
        }
        Value::Integer(_) => Err(CodecError::unsupported_value_kind(
            path.clone(),
            "integer beyond 53-bit precision",
        )),
        Value::Text(s) => Ok(WireValue::String(s.clone())),
        Value::Bytes(_) => Err(CodecError::unsupported_value_kind(path.clone(), "bytes")),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| from_dynamic_at(item, &path.index(i)))
            .collect::<CodecResult<Vec<_>>>()
            .map(WireValue::List),
        Value::Map(pairs) => {
            let mut fields = WireStruct::new();
            for (key, item) in pairs {
                let Some(name) = key.as_text() else {
                    return Err(CodecError::unsupported_value_kind(
                        path.clone(),
                        format!("map key of kind {}", key.kind_name()),
                    ));
                };
                fields.insert(name.to_string(), from_dynamic_at(item, &path.key(name))?);
            }
            Ok(WireValue::Struct(fields))
        }
    }
}

/// Converts a wire attribute bag into dynamic form.
///
/// An empty bag yields an empty map.
pub fn attributes_to_dynamic(attributes: &WireStruct) -> Attributes {
    attributes
        .iter()
        .map(|(k, v)| (k.clone(), to_dynamic(v)))
        .collect()
}

/// Converts a dynamic attribute bag into wire form.
///
/// Attributes are visited in key order and conversion stops at the first
/// failure; nothing is returned for the bag in that case.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedValueKind`] whose path starts with the
/// failing attribute's name.
pub fn attributes_from_dynamic(attributes: &Attributes) -> CodecResult<WireStruct> {
    let root = ValuePath::root();
    attributes
        .iter()
        .map(|(name, value)| {
            let wire = from_dynamic_at(value, &root.key(name))?;
            Ok::<_, CodecError>((name.clone(), wire))
        })
        .collect()
}
