//! Get command implementation.

use super::{CommandResult, Session};
use catalog_service::GetProductRequest;
use catalog_storage::Context;

/// Runs the get command.
pub async fn run(session: &Session, uuid: String) -> CommandResult<()> {
    let service = session.open().await?;
    let product = service
        .get_product(&Context::background(), GetProductRequest { uuid })
        .await?;
    session.print_product(&product)
}
