//! Update command implementation.

use super::json::parse_attributes;
use super::{CommandResult, Session};
use catalog_service::Product;
use catalog_storage::Context;
use tracing::info;

/// Runs the update command.
///
/// The product is replaced as a whole: attributes not given are removed.
pub async fn run(
    session: &Session,
    uuid: String,
    name: String,
    description: String,
    price: f32,
    attributes: Option<&str>,
) -> CommandResult<()> {
    let product = Product {
        uuid,
        name,
        description,
        price,
        attributes: parse_attributes(attributes)?,
    };

    let service = session.open().await?;
    let updated = service
        .update_product(&Context::background(), product)
        .await?;
    info!("Updated product {}", updated.uuid);
    session.print_product(&updated)
}
