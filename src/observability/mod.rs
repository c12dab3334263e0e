//! Tracing subscriber setup for the command-line client.
//!
//! Every layer emits `tracing` spans and events; this module decides where they
//! go. Output is human-readable text on stderr so that stdout stays reserved for
//! command results.
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option (file, `BOOKSHELF_TRACE_LEVEL`, or `--trace-level`)
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing once, early in `main`:
//!
//! ```rust
//! use bookshelf::observability::init_tracing;
//! use bookshelf::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("client starting");
//! ```

mod init;

pub use init::{filter_directive, init_tracing};
