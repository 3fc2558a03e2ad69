//! JSON rendering of products and attributes.

use catalog_codec::{WireStruct, WireValue};
use catalog_service::Product;
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};
use thiserror::Error;

/// Attribute input that cannot be accepted.
#[derive(Debug, Error)]
pub enum AttributeError {
    /// The text is not JSON.
    #[error("attributes are not valid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    /// The JSON is not an object.
    #[error("attributes must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A number has no double-precision form.
    #[error("attribute number {0} is out of range")]
    NumberOutOfRange(Number),
}

/// A product as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ProductView {
    /// Identifier.
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Price.
    pub price: f32,
    /// Attributes as JSON.
    pub attributes: Map<String, Json>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            uuid: product.uuid.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            attributes: struct_to_json(&product.attributes),
        }
    }
}

fn kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

/// Parses a JSON object into wire attributes. `None` gives an empty bag.
pub fn parse_attributes(text: Option<&str>) -> Result<WireStruct, AttributeError> {
    let Some(text) = text else {
        return Ok(WireStruct::new());
    };
    match serde_json::from_str::<Json>(text)? {
        Json::Object(fields) => fields
            .into_iter()
            .map(|(k, v)| Ok::<_, AttributeError>((k, json_to_wire(v)?)))
            .collect(),
        other => Err(AttributeError::NotAnObject(kind(&other))),
    }
}

/// Converts one JSON value to its wire form.
pub fn json_to_wire(json: Json) -> Result<WireValue, AttributeError> {
    Ok(match json {
        Json::Null => WireValue::Null,
        Json::Bool(b) => WireValue::Bool(b),
        Json::Number(n) => match n.as_f64() {
            Some(f) => WireValue::Number(f),
            None => return Err(AttributeError::NumberOutOfRange(n)),
        },
        Json::String(s) => WireValue::String(s),
        Json::Array(items) => WireValue::List(
            items
                .into_iter()
                .map(json_to_wire)
                .collect::<Result<_, _>>()?,
        ),
        Json::Object(fields) => WireValue::Struct(
            fields
                .into_iter()
                .map(|(k, v)| Ok::<_, AttributeError>((k, json_to_wire(v)?)))
                .collect::<Result<_, _>>()?,
        ),
    })
}

/// Converts one wire value to JSON. Non-finite numbers become `null`.
pub fn wire_to_json(wire: &WireValue) -> Json {
    match wire {
        WireValue::Null => Json::Null,
        WireValue::Bool(b) => Json::Bool(*b),
        WireValue::Number(n) => Number::from_f64(*n).map_or(Json::Null, Json::Number),
        WireValue::String(s) => Json::String(s.clone()),
        WireValue::List(items) => Json::Array(items.iter().map(wire_to_json).collect()),
        WireValue::Struct(fields) => Json::Object(struct_to_json(fields)),
    }
}

fn struct_to_json(fields: &WireStruct) -> Map<String, Json> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), wire_to_json(v)))
        .collect()
}
