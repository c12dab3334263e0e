//! Infrastructure layer for filesystem and environment interactions.
//!
//! Currently limited to locating the configuration file and expanding
//! user-supplied paths.

pub mod paths;

pub use paths::{default_config_file, expand_tilde};
