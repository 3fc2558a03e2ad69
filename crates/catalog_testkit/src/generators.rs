//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random catalog data that the wire
//! format can carry.

use catalog_codec::{WireStruct, WireValue};
use catalog_service::Product;
use proptest::prelude::*;

/// Strategy for attribute names.
pub fn attribute_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("Invalid regex")
}

/// Strategy for finite wire numbers.
pub fn wire_number_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        (-1.0e12..1.0e12f64),
        any::<f64>().prop_filter("NaN has no stored form", |f| !f.is_nan()),
    ]
}

/// Strategy for leaf wire values.
pub fn wire_leaf_strategy() -> impl Strategy<Value = WireValue> {
    prop_oneof![
        Just(WireValue::Null),
        any::<bool>().prop_map(WireValue::Bool),
        wire_number_strategy().prop_map(WireValue::Number),
        ".{0,24}".prop_map(WireValue::String),
    ]
}

/// Strategy for arbitrarily nested wire values.
pub fn wire_value_strategy() -> impl Strategy<Value = WireValue> {
    wire_leaf_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(WireValue::List),
            prop::collection::btree_map(attribute_name_strategy(), inner, 0..6)
                .prop_map(WireValue::Struct),
        ]
    })
}

/// Strategy for a whole attribute bag.
pub fn attributes_strategy() -> impl Strategy<Value = WireStruct> {
    prop::collection::btree_map(attribute_name_strategy(), wire_value_strategy(), 0..8)
}

/// Strategy for products without an identifier.
pub fn product_strategy() -> impl Strategy<Value = Product> {
    (
        ".{0,32}",
        ".{0,64}",
        (0.0f32..100_000.0f32),
        attributes_strategy(),
    )
        .prop_map(|(name, description, price, attributes)| Product {
            uuid: String::new(),
            name,
            description,
            price,
            attributes,
        })
}

/// Operation against a catalog, for model-based tests.
#[derive(Debug, Clone)]
pub enum CatalogOperation {
    /// Create a product.
    Create(Product),
    /// Replace the n-th created product (modulo the number created).
    Update(usize, Product),
    /// Delete the n-th created product (modulo the number created).
    Delete(usize),
    /// Get the n-th created product (modulo the number created).
    Get(usize),
}

/// Strategy for catalog operations.
pub fn catalog_operation_strategy() -> impl Strategy<Value = CatalogOperation> {
    prop_oneof![
        3 => product_strategy().prop_map(CatalogOperation::Create),
        1 => (any::<usize>(), product_strategy())
            .prop_map(|(n, product)| CatalogOperation::Update(n, product)),
        1 => any::<usize>().prop_map(CatalogOperation::Delete),
        2 => any::<usize>().prop_map(CatalogOperation::Get),
    ]
}

/// Strategy for a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<CatalogOperation>> {
    prop::collection::vec(catalog_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
