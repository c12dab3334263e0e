//! Transport layer between the catalog and the remote book service.
//!
//! This module provides the [`BookApi`] abstraction over the service's five
//! operations and its HTTP implementation. Every outcome is normalized into a
//! decoded payload or a [`CatalogError`](crate::domain::CatalogError).
//!
//! # Modules
//!
//! - `api`: Service trait used by the store and views
//! - `http`: reqwest implementation against a configured base address
//! - `failure`: Status line and error body message composition

pub mod api;
pub mod failure;
pub mod http;

pub use api::BookApi;
pub use failure::{compose_failure_message, failure_from_status};
pub use http::HttpBookApi;
