//! Error module for the Mauka cuckoo filter library.
//!
//! Each component owns a narrow error enum; `MaukaError` wraps them for
//! callers that cross component boundaries (configuration files, logging
//! setup, filter construction from loaded settings).

use crate::data_structures::lani_cuckoo_filter::LaniCuckooFilterError;
use thiserror::Error;

pub mod config;

/// Result type alias used throughout the library.
pub type MaukaResult<T> = Result<T, MaukaError>;

/// Core error enum for the library.
#[derive(Error, Debug)]
pub enum MaukaError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the cuckoo filter.
    #[error("Filter error: {0}")]
    Filter(#[from] LaniCuckooFilterError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
