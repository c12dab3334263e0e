//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

/// Picks the filter directive: `RUST_LOG` when set, then the configured
/// level, then `"info"`.
#[must_use]
pub fn filter_directive(rust_log: Option<&str>, config: &Config) -> String {
    rust_log
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .or(config.trace_level.as_deref())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Initializes the tracing subscriber with stderr output.
///
/// Sets up a registry that:
/// 1. Filters spans and events with an [`EnvFilter`] built from
///    [`filter_directive`]
/// 2. Formats them as compact text lines on stderr
///
/// An unparsable directive falls back to `"info"`. Idempotent: only the first
/// call installs a subscriber, later calls are no-ops.
///
/// # Example
///
/// ```rust
/// use bookshelf::observability::init_tracing;
/// use bookshelf::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(rust_log.as_deref(), config);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    let _ = subscriber.try_init();
}
