//! Book service abstraction.
//!
//! This module defines the [`BookApi`] trait that the store and views talk to.
//! The trait mirrors the five operations of the remote service one-to-one, so
//! the store can be exercised against an in-memory fake in tests and against
//! [`HttpBookApi`](super::HttpBookApi) everywhere else.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Book, BookId, BookInput, Result};

/// Abstraction over the remote book service.
///
/// Every method performs exactly one round-trip and returns either the decoded
/// payload or a [`CatalogError`](crate::domain::CatalogError) with a
/// human-readable message. Implementations never retry.
#[async_trait]
pub trait BookApi: Send + Sync {
    /// Fetches the whole collection in server order.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the request fails or the body cannot be decoded.
    async fn list(&self) -> Result<Vec<Book>>;

    /// Fetches a single book.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the book does not exist (status 404) or the
    /// request fails.
    async fn get(&self, id: BookId) -> Result<Book>;

    /// Creates a book and returns it with its server-assigned id.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the service rejects the payload or the
    /// request fails.
    async fn create(&self, input: &BookInput) -> Result<Book>;

    /// Replaces the mutable fields of a book and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the book does not exist, the payload is
    /// rejected, or the request fails.
    async fn update(&self, id: BookId, input: &BookInput) -> Result<Book>;

    /// Deletes a book.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the book does not exist or the request fails.
    async fn delete(&self, id: BookId) -> Result<()>;
}

#[async_trait]
impl<T: BookApi + ?Sized> BookApi for Arc<T> {
    async fn list(&self) -> Result<Vec<Book>> {
        (**self).list().await
    }

    async fn get(&self, id: BookId) -> Result<Book> {
        (**self).get(id).await
    }

    async fn create(&self, input: &BookInput) -> Result<Book> {
        (**self).create(input).await
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<Book> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        (**self).delete(id).await
    }
}
