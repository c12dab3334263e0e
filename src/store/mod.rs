//! Catalog store layer.
//!
//! Holds the authoritative in-memory collection and routes every mutation
//! through the transport followed by a reconciling refresh.
//!
//! # Modules
//!
//! - `catalog`: [`CatalogStore`] and its refresh/add/edit/remove operations
//! - `snapshot`: [`CatalogSnapshot`], the state handed to renderers

pub mod catalog;
pub mod snapshot;

pub use catalog::CatalogStore;
pub use snapshot::CatalogSnapshot;
