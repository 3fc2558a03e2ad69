//! Request and response shapes exchanged with the transport.

use catalog_codec::WireStruct;

/// A product as carried on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Product {
    /// Identifier, empty on create requests.
    pub uuid: String,
    /// Display name.
    pub name: String,
    /// Free text description.
    pub description: String,
    /// Unit price.
    pub price: f32,
    /// Arbitrary attributes.
    pub attributes: WireStruct,
}

impl Product {
    /// Creates a product with no identifier and no attributes.
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f32) -> Self {
        Self {
            uuid: String::new(),
            name: name.into(),
            description: description.into(),
            price,
            attributes: WireStruct::new(),
        }
    }
}

/// Fetch one product by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetProductRequest {
    /// Identifier to look up.
    pub uuid: String,
}

/// Remove one product by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteProductRequest {
    /// Identifier to remove.
    pub uuid: String,
}

/// Outcome of a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteProductResponse {
    /// Always `"success"`.
    pub result: String,
}

impl DeleteProductResponse {
    /// The response sent for every completed delete.
    pub fn success() -> Self {
        Self {
            result: "success".to_string(),
        }
    }
}

/// List every product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListProductsRequest {}

/// All products, in store order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListProductsResponse {
    /// The products.
    pub products: Vec<Product>,
}
