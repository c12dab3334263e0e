//! Error types for the bookshelf client.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. Every failure
//! carries a human-readable message suitable for an error banner or an inline
//! form error. All errors are implemented using the `thiserror` crate.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Message shown for failures that carry no message of their own.
pub const UNKNOWN_FAILURE_MESSAGE: &str = "Request failed";

/// Coarse classification of a [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The remote service answered with a non-success status, or could not be
    /// reached, or sent a body that could not be decoded.
    Transport,
    /// User input was rejected locally before any request was made.
    Validation,
    /// A failure without a usable message.
    Unknown,
}

/// The main error type for catalog operations.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::{CatalogError, ErrorKind};
///
/// let err = CatalogError::transport(Some(404), "404 Not Found: book not found");
/// assert_eq!(err.kind(), ErrorKind::Transport);
/// assert!(err.is_not_found());
/// assert_eq!(err.to_string(), "404 Not Found: book not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Round-trip with the remote service failed.
    ///
    /// `status` is the HTTP status when a response arrived, `None` when the
    /// request never got one. The message is already composed for display.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Entry editor input was rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Failure lacking a message.
    #[error("{}", UNKNOWN_FAILURE_MESSAGE)]
    Unknown,
}

impl CatalogError {
    /// Builds a transport failure, falling back to [`CatalogError::Unknown`]
    /// when `message` is blank.
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::Unknown;
        }
        Self::Transport { status, message }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Unknown => ErrorKind::Unknown,
        }
    }

    /// HTTP status of the failed response, if one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns `true` when the service reported that the resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

/// Form field named in validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Author,
    Year,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::Year => "Year",
        };
        f.write_str(label)
    }
}

/// Which end of the accepted year range was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearBound {
    Lower,
    Upper,
}

impl fmt::Display for YearBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("Year must be 0 or greater."),
            Self::Upper => f.write_str("Year looks too large."),
        }
    }
}

/// Local rejection of entry editor input.
///
/// Display strings are the messages shown inline in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was blank after trimming.
    #[error("{0} is required.")]
    EmptyField(Field),

    /// The year text is not a finite integer.
    #[error("Year must be an integer.")]
    NotAnInteger,

    /// The year is outside `0..=3000`.
    ///
    /// `value` is saturated to the `i64` range for very large inputs.
    #[error("{bound}")]
    OutOfRange { value: i64, bound: YearBound },
}

/// Configuration loading failures.
///
/// Only explicit configuration sources (a named file, a malformed value in a
/// file) produce errors; string-map and environment layers fall back to the
/// previous value instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected keys.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The API base address is not an absolute http(s) URL.
    #[error("invalid api_base {value:?}: {reason}")]
    InvalidApiBase { value: String, reason: String },
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
