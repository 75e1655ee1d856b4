//! Mauka Cuckoo Filter Library
//!
//! A scalable cuckoo filter for approximate membership pre-checks in front
//! of caches and storage layers, together with the configuration, error, and
//! logging plumbing needed to embed it in a service.
//!
//! # Architecture
//!
//! - `data_structures::lani_cuckoo_filter` holds the filter itself
//! - `config` loads and validates settings from files and the environment
//! - `error` wraps component errors in a single `MaukaError`
//! - `logging` installs the tracing subscriber

pub mod config;
pub mod data_structures;
pub mod error;
pub mod logging;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for the library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Loads the global configuration from `config/default.toml` (falling back to
/// defaults) and installs the tracing subscriber it describes.
pub fn init() -> error::MaukaResult<()> {
    config::init_default_config()?;
    let config = config::get_global_config()?;
    logging::init_logging(&config.log)?;

    Ok(())
}
