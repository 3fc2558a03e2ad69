//! # Catalog Service
//!
//! Transport-facing handlers for the product catalog.
//!
//! This crate provides:
//! - Wire message shapes ([`Product`] and the request/response types)
//! - Mapping between wire products and catalog records
//! - [`CatalogService`], which runs each request against a
//!   [`ProductRepository`](catalog_core::ProductRepository) under a
//!   per-request timeout
//! - [`Status`] codes for failed requests, logged with `tracing`
//!
//! The network transport itself is left to the embedding application.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
pub mod mapper;
mod messages;
mod service;

pub use config::ServiceConfig;
pub use error::{Code, ServiceError, ServiceResult, Status};
pub use messages::{
    DeleteProductRequest, DeleteProductResponse, GetProductRequest, ListProductsRequest,
    ListProductsResponse, Product,
};
pub use service::CatalogService;
