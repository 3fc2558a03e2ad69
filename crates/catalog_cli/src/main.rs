//! Catalog CLI
//!
//! Command-line access to a file-backed product catalog.
//!
//! # Commands
//!
//! - `create` - Add a product and print it with its new identifier
//! - `get` - Print one product
//! - `update` - Replace a product entirely
//! - `delete` - Remove a product
//! - `list` - Print every product

mod commands;

use clap::{Parser, Subcommand};
use commands::{Format, Session};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Product catalog command-line tool.
#[derive(Parser)]
#[command(name = "catalog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the catalog data file
    #[arg(global = true, short, long, default_value = "catalog.db")]
    data: PathBuf,

    /// Collection holding the products
    #[arg(global = true, short, long, default_value = catalog_core::DEFAULT_COLLECTION)]
    collection: String,

    /// Per-request timeout in milliseconds (0 disables it)
    #[arg(global = true, long, default_value = "30000")]
    timeout_ms: u64,

    /// Output format (text, json)
    #[arg(global = true, short, long, default_value = "text")]
    format: String,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product
    Create {
        /// Product name
        name: String,

        /// Product description
        #[arg(long, default_value = "")]
        description: String,

        /// Unit price
        #[arg(short, long, default_value = "0")]
        price: f32,

        /// Attributes as a JSON object
        #[arg(short, long)]
        attributes: Option<String>,
    },

    /// Print one product
    Get {
        /// Product identifier
        uuid: String,
    },

    /// Replace a product entirely
    Update {
        /// Product identifier
        uuid: String,

        /// Product name
        name: String,

        /// Product description
        #[arg(long, default_value = "")]
        description: String,

        /// Unit price
        #[arg(short, long, default_value = "0")]
        price: f32,

        /// Attributes as a JSON object
        #[arg(short, long)]
        attributes: Option<String>,
    },

    /// Remove a product
    Delete {
        /// Product identifier
        uuid: String,
    },

    /// Print every product
    List,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = Session {
        data: cli.data,
        collection: cli.collection,
        timeout: (cli.timeout_ms > 0).then(|| Duration::from_millis(cli.timeout_ms)),
        format: Format::parse(&cli.format)?,
    };

    match cli.command {
        Commands::Create {
            name,
            description,
            price,
            attributes,
        } => {
            commands::create::run(&session, name, description, price, attributes.as_deref())
                .await?;
        }
        Commands::Get { uuid } => commands::get::run(&session, uuid).await?,
        Commands::Update {
            uuid,
            name,
            description,
            price,
            attributes,
        } => {
            commands::update::run(
                &session,
                uuid,
                name,
                description,
                price,
                attributes.as_deref(),
            )
            .await?;
        }
        Commands::Delete { uuid } => commands::delete::run(&session, uuid).await?,
        Commands::List => commands::list::run(&session).await?,
    }

    Ok(())
}
