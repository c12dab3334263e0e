//! Book domain model.
//!
//! This module defines the `Book` entity as the remote service returns it and
//! the `BookInput` payload sent on create and update. Both serialize to the
//! service's JSON shapes directly, so no separate wire DTOs exist.

use serde::{Deserialize, Serialize};

/// Server-assigned book identifier.
pub type BookId = i64;

/// Smallest year accepted for a book.
pub const MIN_YEAR: i32 = 0;

/// Largest year accepted for a book.
pub const MAX_YEAR: i32 = 3000;

/// A book record held by the remote service.
///
/// Values of this type only ever come from the transport layer: the store never
/// builds one locally. The `id` is assigned by the server on create and does
/// not change afterwards.
///
/// # Fields
///
/// - `id`: Positive identifier assigned by the service
/// - `title`: Non-empty, trimmed title
/// - `author`: Non-empty, trimmed author name
/// - `year`: Publication year in `0..=3000`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl Book {
    /// Returns the mutable fields of this book as a request payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use bookshelf::domain::{Book, BookInput};
    ///
    /// let book = Book {
    ///     id: 7,
    ///     title: "Dune".to_string(),
    ///     author: "Frank Herbert".to_string(),
    ///     year: 1965,
    /// };
    /// assert_eq!(book.to_input(), BookInput::new("Dune", "Frank Herbert", 1965));
    /// ```
    #[must_use]
    pub fn to_input(&self) -> BookInput {
        BookInput {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
        }
    }

    /// Returns `true` when this book carries the same title, author, and year
    /// as `input`.
    #[must_use]
    pub fn matches(&self, input: &BookInput) -> bool {
        self.title == input.title && self.author == input.author && self.year == input.year
    }
}

/// Payload for create and update requests.
///
/// Built by the entry editor from validated, trimmed form values and discarded
/// once the request resolves. Serializes as `{title, author, year}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl BookInput {
    /// Creates a payload from its parts without validating them.
    ///
    /// Use the entry editor's validation to build payloads from user input.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}
