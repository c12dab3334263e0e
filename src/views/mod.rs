//! Headless view models for the list and detail screens.
//!
//! These types hold the per-screen state a renderer needs (banners, the hosted
//! entry editor, loading flags) and call into the store or the service. They
//! draw nothing and navigate nowhere; [`DetailOutcome`] tells the caller when
//! to leave the detail screen.
//!
//! # Modules
//!
//! - [`banner`]: Dismissible error banners
//! - [`list`]: Catalog list screen
//! - [`detail`]: Single-book detail screen

pub mod banner;
pub mod detail;
pub mod list;

pub use banner::{BannerSlot, ErrorBanner};
pub use detail::{parse_book_id, BookDetailView, DetailOutcome};
pub use list::{CatalogListView, ListStatus};

use crate::domain::CatalogError;

/// Display text for a failed action, with a screen-specific fallback for
/// failures that carry no message.
fn failure_message(err: &CatalogError, fallback: &str) -> String {
    match err {
        CatalogError::Unknown => fallback.to_owned(),
        other => other.to_string(),
    }
}
