//! List command implementation.

use super::{CommandResult, Session};
use catalog_service::ListProductsRequest;
use catalog_storage::Context;

/// Runs the list command.
pub async fn run(session: &Session) -> CommandResult<()> {
    let service = session.open().await?;
    let response = service
        .list_products(&Context::background(), ListProductsRequest::default())
        .await?;
    session.print_products(&response.products)
}
