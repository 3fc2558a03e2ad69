//! Create command implementation.

use super::json::parse_attributes;
use super::{CommandResult, Session};
use catalog_service::Product;
use catalog_storage::Context;
use tracing::info;

/// Runs the create command.
pub async fn run(
    session: &Session,
    name: String,
    description: String,
    price: f32,
    attributes: Option<&str>,
) -> CommandResult<()> {
    let mut product = Product::new(name, description, price);
    product.attributes = parse_attributes(attributes)?;

    let service = session.open().await?;
    let created = service
        .create_product(&Context::background(), product)
        .await?;
    info!("Created product {} in {:?}", created.uuid, session.data());
    session.print_product(&created)
}
