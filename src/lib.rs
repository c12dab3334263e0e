//! Bookshelf: a client for a remote book catalog service.
//!
//! Bookshelf keeps a local, always-reconciled view of a remote catalog of
//! books and provides the building blocks for editing it:
//! - A transport client for the service's HTTP+JSON API
//! - A catalog store that re-fetches the whole collection after every mutation
//! - A reusable entry editor with local validation and a submission state machine
//! - Headless list and detail screen models with dismissible error banners

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command-line front end (main.rs)                   │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Views (views/)                                     │  ← Screen models
//! │  - Catalog list, book detail                        │
//! │  - Error banners                                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Editor        │   │ Store         │   │ Transport     │
//! │ (editor/)     │   │ (store/)      │   │ (transport/)  │
//! │ - Validation  │   │ - Snapshot    │   │ - BookApi     │
//! │ - Submission  │   │ - Refresh     │   │ - reqwest     │
//! │ - Phases      │   │ - Mutations   │   │ - Failures    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Config file paths (infrastructure/)              │
//! │  - Error types (domain/error)                       │
//! │  - Book model (domain/book)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, stderr output                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Core domain types (Book, errors)
//! - [`transport`]: Book service client trait and HTTP adapter
//! - [`store`]: Catalog store with refresh-after-mutation
//! - [`editor`]: Entry editor workflow and validation
//! - [`views`]: List and detail screen models
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Configuration is layered, lowest precedence first: built-in defaults, a TOML
//! file, environment variables, and finally command-line flags.
//!
//! ```toml
//! # ~/.config/bookshelf/config.toml
//! api_base = "http://localhost:8080"
//! request_timeout_secs = 10
//! trace_level = "debug"
//! ```
//!
//! `BOOKSHELF_API_BASE` and `BOOKSHELF_TRACE_LEVEL` override the file.
//!
//! # Consistency Model
//!
//! The store never patches its collection locally. Every successful create,
//! update, or delete is followed by a full list fetch, so what is shown is what
//! the server last reported. Overlapping refreshes are ordered by a generation
//! ticket: only the most recently started refresh may publish its result.
//!
//! # Examples
//!
//! ```no_run
//! use bookshelf::{initialize, BookInput, Config};
//!
//! # async fn run() -> bookshelf::Result<()> {
//! let store = initialize(&Config::default()).await?;
//! store.add_book(&BookInput::new("Dune", "Frank Herbert", 1965)).await?;
//!
//! for book in store.snapshot().sorted_by_id() {
//!     println!("{} by {}", book.title, book.author);
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;
pub mod editor;
pub mod infrastructure;
pub mod observability;
pub mod store;
pub mod transport;
pub mod views;

#[cfg(test)]
mod test_support;

pub use domain::{Book, BookId, BookInput, CatalogError, ConfigError, ErrorKind, Result};
pub use editor::{EntryEditor, Submission, SubmissionTarget, SubmitOutcome};
pub use store::{CatalogSnapshot, CatalogStore};
pub use transport::{BookApi, HttpBookApi};

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Service address used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Environment variable overriding [`Config::api_base`].
pub const API_BASE_ENV: &str = "BOOKSHELF_API_BASE";

/// Environment variable overriding [`Config::trace_level`].
pub const TRACE_LEVEL_ENV: &str = "BOOKSHELF_TRACE_LEVEL";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base address of the book service. Resource paths are appended to it.
    ///
    /// Default: `http://localhost:8080`
    pub api_base: Url,

    /// Per-request timeout. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,

    /// Tracing level for log output.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout: None,
            trace_level: None,
        }
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("built-in api base should always parse")
}

/// On-disk shape of the TOML configuration file.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api_base: Option<String>,
    request_timeout_secs: Option<u64>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a flat string map.
    ///
    /// Unknown keys are ignored and values that fail to parse fall back to the
    /// defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base`: absolute `http`/`https` URL
    /// - `request_timeout_secs`: String → `u64` seconds, `0` disables the timeout
    /// - `trace_level`: String → `Option<String>` (blank means unset)
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use std::time::Duration;
    /// use bookshelf::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "https://books.example/api".to_string());
    /// map.insert("request_timeout_secs".to_string(), "5".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_base.as_str(), "https://books.example/api");
    /// assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let api_base = map
            .get("api_base")
            .and_then(|raw| parse_api_base(raw).ok())
            .unwrap_or_else(default_api_base);

        let request_timeout = map
            .get("request_timeout_secs")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .and_then(timeout_from_secs);

        Self {
            api_base,
            request_timeout,
            trace_level: map.get("trace_level").and_then(|s| non_blank(s)),
        }
    }

    /// Parses a TOML document on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or mistyped values and
    /// [`ConfigError::InvalidApiBase`] for an unusable `api_base`.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Self::default().merge_file(file)
    }

    /// Reads and parses a TOML configuration file. A leading `~` is expanded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise the
    /// errors of [`Config::from_toml_str`].
    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let path = infrastructure::expand_tilde(path);
        let text = std::fs::read_to_string(&path)
            .map_err(|source| ConfigError::Read { path: path.clone(), source })?;
        tracing::debug!(path = %path.display(), "read config file");
        Self::from_toml_str(&text)
    }

    /// Resolves configuration from a file and the process environment.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is used when present and silently skipped otherwise.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Config::from_file`].
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => match infrastructure::default_config_file() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => Self::default(),
            },
        };
        Ok(base.with_env())
    }

    /// Applies `BOOKSHELF_*` overrides from the process environment.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Applies `BOOKSHELF_*` overrides read through `lookup`.
    ///
    /// Blank values are ignored, as is an `api_base` that does not parse.
    #[must_use]
    pub fn with_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(API_BASE_ENV).and_then(|s| non_blank(&s)) {
            match parse_api_base(&raw) {
                Ok(url) => self.api_base = url,
                Err(e) => tracing::debug!(error = %e, "ignoring invalid api base from environment"),
            }
        }
        if let Some(level) = lookup(TRACE_LEVEL_ENV).and_then(|s| non_blank(&s)) {
            self.trace_level = Some(level);
        }
        self
    }

    fn merge_file(mut self, file: ConfigFile) -> std::result::Result<Self, ConfigError> {
        if let Some(raw) = file.api_base {
            self.api_base = parse_api_base(&raw)?;
        }
        if let Some(secs) = file.request_timeout_secs {
            self.request_timeout = timeout_from_secs(secs);
        }
        if let Some(level) = file.trace_level.as_deref().and_then(non_blank) {
            self.trace_level = Some(level);
        }
        Ok(self)
    }
}

/// Parses a service base address.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiBase`] unless `raw` is an absolute
/// `http` or `https` URL with a host.
///
/// # Example
///
/// ```rust
/// use bookshelf::parse_api_base;
///
/// assert!(parse_api_base("http://localhost:8080").is_ok());
/// assert!(parse_api_base("ftp://localhost").is_err());
/// ```
pub fn parse_api_base(raw: &str) -> std::result::Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidApiBase {
        value: raw.to_string(),
        reason,
    };
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url)
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Connects to the configured service and loads the catalog.
///
/// Builds an [`HttpBookApi`] from `config` and opens a [`CatalogStore`] on it,
/// which performs the initial refresh. A failed initial load is not an error:
/// it is reported through the store snapshot like any other refresh failure.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be constructed.
pub async fn initialize(config: &Config) -> Result<CatalogStore<HttpBookApi>> {
    tracing::debug!(api_base = %config.api_base, "initializing bookshelf client");
    let api = HttpBookApi::from_config(config)?;
    Ok(CatalogStore::open(api).await)
}
