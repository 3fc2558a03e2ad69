//! # Catalog Testkit
//!
//! Test utilities for the catalog.
//!
//! This crate provides:
//! - Fixtures: the sample product, wired repositories and services
//! - Deterministic id generators
//! - [`ScriptedStore`], a store double that fails or stalls on demand
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust
//! use catalog_storage::Context;
//! use catalog_testkit::prelude::*;
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let (_store, repo) = memory_repository();
//! let created = repo.create(&Context::background(), sample_record()).await.unwrap();
//! assert_eq!(created.id.as_str(), "product-0");
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod doubles;
pub mod fixtures;
pub mod generators;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::doubles::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::ids::*;
}

pub use doubles::*;
pub use fixtures::*;
pub use generators::*;
pub use ids::*;
