//! Reqwest-backed book service client.
//!
//! This adapter owns transport details only: URL building, request headers,
//! JSON encoding of payloads, and mapping of every response into a decoded
//! value or a [`CatalogError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;

use super::api::BookApi;
use super::failure::failure_from_status;
use crate::domain::{Book, BookId, BookInput, CatalogError, Result};
use crate::Config;

const JSON_MEDIA_TYPE: &str = "application/json";
const NO_STORE: &str = "no-store";

/// Book service client that talks HTTP+JSON to one base address.
///
/// Paths (`/books`, `/books/{id}`) are appended to the base address verbatim,
/// so a base with a path prefix such as `http://host/api` is honoured.
#[derive(Debug, Clone)]
pub struct HttpBookApi {
    client: Client,
    base: Url,
}

impl HttpBookApi {
    /// Builds a client without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be constructed.
    pub fn new(base: Url) -> Result<Self> {
        Self::with_timeout(base, None)
    }

    /// Builds a client with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be constructed.
    pub fn with_timeout(base: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            CatalogError::transport(None, format!("failed to build HTTP client: {e}"))
        })?;

        tracing::debug!(base = %base, timeout = ?timeout, "http book api ready");
        Ok(Self { client, base })
    }

    /// Builds a client from the base address and timeout in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying reqwest client cannot be constructed.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_timeout(config.api_base.clone(), config.request_timeout)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}{path}", self.base.as_str().trim_end_matches('/'));
        Url::parse(&joined)
            .map_err(|e| CatalogError::transport(None, format!("invalid request url {joined}: {e}")))
    }

    /// Performs one round-trip and returns the body of a success response.
    ///
    /// A 204 response yields `None`. Non-success statuses are mapped through
    /// [`failure_from_status`].
    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<&BookInput>,
    ) -> Result<Option<Vec<u8>>> {
        let url = self.endpoint(path)?;
        let span = tracing::debug_span!("http_request", method = %method, url = %url);

        async move {
            let mut request = self
                .client
                .request(method, url)
                .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
                .header(ACCEPT, JSON_MEDIA_TYPE)
                .header(CACHE_CONTROL, NO_STORE);
            if let Some(payload) = payload {
                request = request.json(payload);
            }

            let response = request.send().await.map_err(map_transport_error)?;
            let status = response.status();
            if !status.is_success() {
                // An unreadable error body still leaves the status line.
                let body = response.bytes().await.unwrap_or_default();
                let err = failure_from_status(status, body.as_ref());
                tracing::debug!(status = status.as_u16(), error = %err, "request failed");
                return Err(err);
            }

            let body = response.bytes().await.map_err(map_transport_error)?;

            tracing::debug!(status = status.as_u16(), bytes = body.len(), "request succeeded");
            if status == StatusCode::NO_CONTENT {
                return Ok(None);
            }
            Ok(Some(body.to_vec()))
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list(&self) -> Result<Vec<Book>> {
        decode(self.execute(Method::GET, "/books", None).await?)
    }

    async fn get(&self, id: BookId) -> Result<Book> {
        decode(self.execute(Method::GET, &book_path(id), None).await?)
    }

    async fn create(&self, input: &BookInput) -> Result<Book> {
        decode(self.execute(Method::POST, "/books", Some(input)).await?)
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<Book> {
        decode(self.execute(Method::PUT, &book_path(id), Some(input)).await?)
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        // Any success body is ignored; the service answers 204.
        self.execute(Method::DELETE, &book_path(id), None).await?;
        Ok(())
    }
}

fn book_path(id: BookId) -> String {
    format!("/books/{id}")
}

fn decode<T: DeserializeOwned>(body: Option<Vec<u8>>) -> Result<T> {
    let body = body.ok_or_else(|| CatalogError::transport(None, "empty response body"))?;
    serde_json::from_slice(&body)
        .map_err(|e| CatalogError::transport(None, format!("invalid response body: {e}")))
}

fn map_transport_error(error: reqwest::Error) -> CatalogError {
    CatalogError::transport(error.status().map(|s| s.as_u16()), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    fn api(base: &str) -> HttpBookApi {
        HttpBookApi::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_appends_path_to_bare_host() {
        let url = api("http://localhost:8080").endpoint("/books/3").unwrap();

        assert_eq!(url.as_str(), "http://localhost:8080/books/3");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = api("http://example.test/api/").endpoint("/books").unwrap();

        assert_eq!(url.as_str(), "http://example.test/api/books");
    }

    #[test]
    fn decode_rejects_missing_body() {
        let err = decode::<Vec<Book>>(None).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.to_string(), "empty response body");
    }

    #[test]
    fn decode_names_malformed_payloads() {
        let err = decode::<Book>(Some(b"{\"id\":\"x\"}".to_vec())).unwrap_err();

        assert!(err.to_string().starts_with("invalid response body:"));
    }

    #[test]
    fn decode_reads_book_lists() {
        let books: Vec<Book> = decode(Some(
            br#"[{"id":1,"title":"A","author":"B","year":2000}]"#.to_vec(),
        ))
        .unwrap();

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, 1);
    }
}
