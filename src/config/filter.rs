//! Cuckoo filter configuration module.
//!
//! This module defines the file/environment settings used to size the
//! membership filter.

use super::{ConfigResult, Validate};
use crate::data_structures::lani_cuckoo_filter::LaniCuckooFilterConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Cuckoo filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Number of items the first generation is sized for
    pub capacity: u64,

    /// Fingerprint slots per bucket
    pub bucket_size: u16,

    /// Displacement attempts before growing
    pub max_iterations: u16,

    /// Growth factor between generations (0 disables growth)
    pub expansion: u16,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            capacity: 100_000,
            bucket_size: 2,
            max_iterations: 20,
            expansion: 1,
        }
    }
}

impl Validate for FilterConfig {
    fn validate(&self) -> ConfigResult<()> {
        LaniCuckooFilterConfig::try_from(self)
            .map(|_| ())
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
