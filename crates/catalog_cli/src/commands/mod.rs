//! CLI command implementations.

pub mod create;
pub mod delete;
pub mod get;
pub mod json;
pub mod list;
pub mod update;

use catalog_core::{ProductRepository, RepositoryConfig};
use catalog_service::{CatalogService, Product, ServiceConfig, Status};
use catalog_storage::{FileStore, StoreError};
use json::{AttributeError, ProductView};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The data file could not be opened.
    #[error("cannot open catalog: {0}")]
    Open(#[from] StoreError),

    /// The attribute argument was rejected.
    #[error(transparent)]
    Attributes(#[from] AttributeError),

    /// The request failed.
    #[error("{0}")]
    Request(#[from] Status),

    /// Output could not be rendered.
    #[error("cannot render output: {0}")]
    Render(#[from] serde_json::Error),

    /// Unknown `--format` value.
    #[error("unknown output format {0:?} (expected text or json)")]
    Format(String),
}

/// Result type for CLI commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One `field: value` line per field.
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl Format {
    /// Parses a `--format` value.
    pub fn parse(value: &str) -> CommandResult<Self> {
        match value {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(CommandError::Format(other.to_string())),
        }
    }
}

/// Options shared by every command.
#[derive(Debug, Clone)]
pub struct Session {
    /// Catalog data file.
    pub data: std::path::PathBuf,
    /// Collection holding the products.
    pub collection: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Output format.
    pub format: Format,
}

impl Session {
    /// Opens the data file and wires a service over it.
    pub async fn open(&self) -> CommandResult<CatalogService<FileStore>> {
        let store = FileStore::open_with_create_dirs(&self.data).await?;
        let repository = ProductRepository::new(Arc::new(store))
            .with_config(RepositoryConfig::new().collection(self.collection.clone()));
        let config = match self.timeout {
            Some(timeout) => ServiceConfig::new().with_request_timeout(timeout),
            None => ServiceConfig::new().without_request_timeout(),
        };
        Ok(CatalogService::with_config(Arc::new(repository), config))
    }

    /// Path of the data file.
    pub fn data(&self) -> &Path {
        &self.data
    }

    /// Prints one product.
    pub fn print_product(&self, product: &Product) -> CommandResult<()> {
        let view = ProductView::from(product);
        match self.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
            Format::Text => print_text(&view)?,
        }
        Ok(())
    }

    /// Prints a list of products.
    pub fn print_products(&self, products: &[Product]) -> CommandResult<()> {
        let views: Vec<ProductView> = products.iter().map(ProductView::from).collect();
        match self.format {
            Format::Json => println!("{}", serde_json::to_string_pretty(&views)?),
            Format::Text => {
                for (i, view) in views.iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    print_text(view)?;
                }
                println!("{} product(s)", views.len());
            }
        }
        Ok(())
    }
}

fn print_text(view: &ProductView) -> CommandResult<()> {
    println!("uuid:        {}", view.uuid);
    println!("name:        {}", view.name);
    println!("description: {}", view.description);
    println!("price:       {}", view.price);
    println!(
        "attributes:  {}",
        serde_json::to_string(&view.attributes)?
    );
    Ok(())
}
