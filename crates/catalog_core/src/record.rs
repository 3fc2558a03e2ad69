//! Catalog records and their document form.

use crate::id::RecordId;
use catalog_codec::{Attributes, CodecError, CodecResult, Value, ValuePath};

/// Document field holding the record identifier.
pub const FIELD_ID: &str = "uuid";
/// Document field holding the record name.
pub const FIELD_NAME: &str = "name";
/// Document field holding the record description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Document field holding the record price.
pub const FIELD_PRICE: &str = "price";
/// Document field holding the attribute bag.
pub const FIELD_ATTRIBUTES: &str = "attributes";

/// A catalog entry: fixed typed fields plus free-form attributes.
///
/// Attributes are held in their dynamic form; converting them to the wire
/// form can fail and happens at the transport boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Identifier, empty until the record is created.
    pub id: RecordId,
    /// Display name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Unit price. Carries no currency.
    pub price: f32,
    /// Attribute name to value.
    pub attributes: Attributes,
}

impl Record {
    /// Creates an unpersisted record with no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f32) -> Self {
        Self {
            id: RecordId::unassigned(),
            name: name.into(),
            description: description.into(),
            price,
            attributes: Attributes::new(),
        }
    }

    /// Sets the identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<RecordId>) -> Self {
        self.id = id.into();
        self
    }

    /// Adds or replaces one attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builds the stored document for this record.
    ///
    /// The document always carries every fixed field and an `attributes`
    /// map, empty or not.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let attributes = Value::map(
            self.attributes
                .iter()
                .map(|(k, v)| (Value::Text(k.clone()), v.clone()))
                .collect(),
        );
        Value::text_map([
            (FIELD_ID, Value::Text(self.id.as_str().to_string())),
            (FIELD_NAME, Value::Text(self.name.clone())),
            (FIELD_DESCRIPTION, Value::Text(self.description.clone())),
            (FIELD_PRICE, Value::Float(f64::from(self.price))),
            (FIELD_ATTRIBUTES, attributes),
        ])
    }

    /// Reads a record back from a stored document.
    ///
    /// Absent fields take their zero value. Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidStructure`] if the document is not a
    /// map, or if a known field holds the wrong kind of value.
    pub fn from_document(document: &Value) -> CodecResult<Self> {
        if document.as_map().is_none() {
            return Err(CodecError::invalid_structure(format!(
                "expected document map, found {}",
                document.kind_name()
            )));
        }

        Ok(Self {
            id: RecordId::new(text_field(document, FIELD_ID)?),
            name: text_field(document, FIELD_NAME)?,
            description: text_field(document, FIELD_DESCRIPTION)?,
            price: price_field(document)?,
            attributes: attributes_field(document)?,
        })
    }
}

fn wrong_kind(field: &str, expected: &str, found: &Value) -> CodecError {
    CodecError::invalid_structure(format!(
        "field {field:?} must be {expected}, found {}",
        found.kind_name()
    ))
}

fn text_field(document: &Value, field: &str) -> CodecResult<String> {
    match document.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::Text(s)) => Ok(s.clone()),
        Some(other) => Err(wrong_kind(field, "text", other)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn price_field(document: &Value) -> CodecResult<f32> {
    match document.get(FIELD_PRICE) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Float(f)) => Ok(*f as f32),
        Some(Value::Integer(n)) => Ok(*n as f32),
        Some(other) => Err(wrong_kind(FIELD_PRICE, "a number", other)),
    }
}

fn attributes_field(document: &Value) -> CodecResult<Attributes> {
    let entries = match document.get(FIELD_ATTRIBUTES) {
        None | Some(Value::Null) => return Ok(Attributes::new()),
        Some(Value::Map(entries)) => entries,
        Some(other) => return Err(wrong_kind(FIELD_ATTRIBUTES, "a map", other)),
    };

    let mut attributes = Attributes::new();
    for (key, value) in entries {
        let Value::Text(name) = key else {
            return Err(CodecError::unsupported_value_kind(
                ValuePath::root().key(FIELD_ATTRIBUTES),
                format!("{} key", key.kind_name()),
            ));
        };
        attributes.insert(name.clone(), value.clone());
    }
    Ok(attributes)
}
