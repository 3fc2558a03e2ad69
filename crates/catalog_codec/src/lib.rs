//! # Catalog Codec
//!
//! Value types and conversions for catalog attributes.
//!
//! Attributes exist in two shapes:
//! - [`WireValue`]: the strongly-typed form exchanged with clients
//!   (null, number, string, bool, struct, list)
//! - [`Value`]: the dynamic, schema-less form stored inside documents
//!
//! [`to_dynamic`] and [`from_dynamic`] convert between them. Conversion
//! towards the wire is fallible because stored documents can hold kinds the
//! wire format has no variant for; those fail with
//! [`CodecError::UnsupportedValueKind`] and a [`ValuePath`] naming the
//! element.
//!
//! Documents are persisted as canonical CBOR ([`to_canonical_cbor`],
//! [`from_cbor`]): sorted map keys, shortest integers, doubles for floats,
//! no NaN and no indefinite lengths.
//!
//! ## Usage
//!
//! ```
//! use catalog_codec::{from_dynamic, to_dynamic, Value, WireValue};
//!
//! let wire = WireValue::from(vec!["red", "blue"]);
//! let dynamic = to_dynamic(&wire);
//! assert_eq!(dynamic, Value::Array(vec![Value::from("red"), Value::from("blue")]));
//! assert_eq!(from_dynamic(&dynamic).unwrap(), wire);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod convert;
mod decoder;
mod encoder;
mod error;
mod path;
mod value;
mod wire;

pub use convert::{
    attributes_from_dynamic, attributes_to_dynamic, from_dynamic, to_dynamic, Attributes,
    MAX_EXACT_INTEGER,
};
pub use decoder::{from_cbor, CanonicalDecoder};
pub use encoder::{to_canonical_cbor, CanonicalEncoder};
pub use error::{CodecError, CodecResult};
pub use path::{PathSegment, ValuePath};
pub use value::Value;
pub use wire::{WireStruct, WireValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_value_survives_storage() {
        let wire = WireValue::structure([
            ("color", WireValue::from("blue")),
            ("size", WireValue::from(12)),
            ("dims", WireValue::from(vec![1.5, 2.25])),
            ("discontinued", WireValue::Bool(false)),
            ("notes", WireValue::Null),
        ]);

        let bytes = to_canonical_cbor(&to_dynamic(&wire)).unwrap();
        let restored = from_dynamic(&from_cbor(&bytes).unwrap()).unwrap();
        assert_eq!(restored, wire);
    }

    #[test]
    fn storage_rejects_nan_attribute() {
        let wire = WireValue::structure([("ratio", WireValue::Number(f64::NAN))]);
        assert_eq!(
            to_canonical_cbor(&to_dynamic(&wire)),
            Err(CodecError::NaNForbidden)
        );
    }
}
