//! Tracing subscriber setup.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. `format` is `text` or
/// `json`; JSON output is one object per event for log shippers.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init(default_level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let result = if format == "json" {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_ansi(true).try_init()
    };

    result.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
