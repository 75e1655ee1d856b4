//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over the configured level when it is set.

use crate::config::LogConfig;
use crate::error::{MaukaError, MaukaResult};
use tracing_subscriber::EnvFilter;

/// Build the event filter for a log configuration.
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns `MaukaError::Custom` if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> MaukaResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_line_number(config.source_location)
        .with_file(config.source_location);

    let result = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MaukaError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}
