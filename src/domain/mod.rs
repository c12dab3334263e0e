//! Domain layer for the bookshelf client.
//!
//! This module contains the record types exchanged with the remote book service
//! and the error taxonomy shared by every other layer. Nothing in here touches
//! the network or holds state; the transport, store, and editor layers build on
//! these types.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`book`]: `Book` entity and `BookInput` payload
//!
//! # Examples
//!
//! ```
//! use bookshelf::domain::{BookInput, Result};
//!
//! fn draft() -> Result<BookInput> {
//!     Ok(BookInput::new("Dune", "Frank Herbert", 1965))
//! }
//! ```

pub mod book;
pub mod error;

pub use book::{Book, BookId, BookInput, MAX_YEAR, MIN_YEAR};
pub use error::{CatalogError, ConfigError, ErrorKind, Field, Result, ValidationError, YearBound};
