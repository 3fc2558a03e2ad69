//! Delete command implementation.

use super::{CommandResult, Format, Session};
use catalog_service::DeleteProductRequest;
use catalog_storage::Context;

/// Runs the delete command.
pub async fn run(session: &Session, uuid: String) -> CommandResult<()> {
    let service = session.open().await?;
    let response = service
        .delete_product(&Context::background(), DeleteProductRequest { uuid })
        .await?;
    match session.format {
        Format::Json => println!("{}", serde_json::json!({ "result": response.result })),
        Format::Text => println!("{}", response.result),
    }
    Ok(())
}
