//! # Catalog Core
//!
//! Product records and the repository that stores them.
//!
//! This crate provides:
//! - [`Record`]: fixed product fields plus a bag of dynamic attributes
//! - [`ProductRepository`]: create, get, update, delete and list over any
//!   [`DocumentStore`](catalog_storage::DocumentStore)
//! - [`RecordStream`]: lazy, cursor-backed listing
//! - [`IdGenerator`]: pluggable identifier assignment
//!
//! Errors distinguish a missing record ([`CoreError::NotFound`]) from store
//! failures ([`CoreError::Persistence`]) and interrupted calls
//! ([`CoreError::Canceled`]).

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod id;
pub mod record;
mod repository;

pub use config::{RepositoryConfig, DEFAULT_COLLECTION};
pub use error::{CoreError, CoreResult, Operation, PersistenceCause};
pub use id::{IdGenerator, RecordId, UuidGenerator};
pub use record::Record;
pub use repository::{ProductRepository, RecordStream};
