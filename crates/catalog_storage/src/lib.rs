//! # Catalog Storage
//!
//! Document store contract and implementations for the catalog.
//!
//! A store holds named collections of dynamic documents ([`Value`] maps
//! with text keys) and serves single-document writes plus filtered reads
//! through a lazy [`DocumentCursor`]. Every call carries a [`Context`] so
//! callers can bound it with a deadline or cancel it.
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral catalogs
//! - [`FileStore`] - Persists all collections to a single file
//!
//! ## Example
//!
//! ```rust
//! use catalog_codec::Value;
//! use catalog_storage::{Context, DocumentStore, Filter, InMemoryStore};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let store = InMemoryStore::new();
//! let ctx = Context::background();
//! store
//!     .insert_one(&ctx, "products", Value::text_map([("uuid", Value::from("a1"))]))
//!     .await
//!     .unwrap();
//!
//! let mut cursor = store.find(&ctx, "products", &Filter::all()).await.unwrap();
//! assert!(cursor.next(&ctx).await.unwrap().is_some());
//! assert!(cursor.next(&ctx).await.unwrap().is_none());
//! cursor.close().await.unwrap();
//! # });
//! ```
//!
//! [`Value`]: catalog_codec::Value

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod error;
mod file;
mod filter;
mod memory;
mod store;

pub use context::{Context, Interrupted};
pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use filter::Filter;
pub use memory::InMemoryStore;
pub use store::{BoxCursor, DeleteResult, DocumentCursor, DocumentStore, UpdateResult};
