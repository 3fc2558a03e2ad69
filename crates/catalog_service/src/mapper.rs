//! Conversion between wire products and catalog records.

use crate::error::{ServiceError, ServiceResult};
use crate::messages::Product;
use catalog_codec::{attributes_from_dynamic, attributes_to_dynamic, CodecResult};
use catalog_core::{Record, RecordId};

/// Builds a record from a wire product. Never fails.
pub fn product_to_record(product: &Product) -> Record {
    Record {
        id: RecordId::new(product.uuid.clone()),
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        attributes: attributes_to_dynamic(&product.attributes),
    }
}

/// Builds a wire product from a record.
///
/// # Errors
///
/// Fails with the codec error of the first attribute (in name order) that
/// has no wire form.
pub fn record_to_product(record: &Record) -> CodecResult<Product> {
    Ok(Product {
        uuid: record.id.as_str().to_string(),
        name: record.name.clone(),
        description: record.description.clone(),
        price: record.price,
        attributes: attributes_from_dynamic(&record.attributes)?,
    })
}

/// Converts a list of records, reporting the position of the first failure.
///
/// # Errors
///
/// Returns [`ServiceError::Convert`] carrying the failing index.
pub fn records_to_products(records: &[Record]) -> ServiceResult<Vec<Product>> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record_to_product(record).map_err(|source| ServiceError::Convert {
                index: Some(index),
                source,
            })
        })
        .collect()
}
