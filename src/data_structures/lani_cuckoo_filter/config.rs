// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the Lani Cuckoo Filter.

use crate::config::filter::FilterConfig;
use crate::data_structures::lani_cuckoo_filter::error::LaniCuckooFilterError;

/// Largest accepted capacity. Keeps the power-of-two rounding of the bucket
/// count, and the first few growth steps, far from `u64` overflow.
pub const MAX_CAPACITY: u64 = 1 << 48;

/// Configuration for the Lani Cuckoo Filter.
///
/// Sizing follows the classic `(2, b)` cuckoo filter trade-off: every key has two
/// candidate buckets of `bucket_size` slots, so the false positive rate is about
/// `2 * bucket_size / 256` with 8-bit fingerprints. Larger buckets fill better
/// but collide more often.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaniCuckooFilterConfig {
    /// Number of items the first generation is sized for
    capacity: u64,

    /// Fingerprint slots per bucket
    bucket_size: u16,

    /// Displacement attempts before an insert gives up on the newest generation
    max_iterations: u16,

    /// Growth factor between generations; 0 disables growth
    expansion: u16,
}

impl LaniCuckooFilterConfig {
    /// Create a new default configuration.
    ///
    /// Default values:
    /// - capacity: 100,000
    /// - bucket_size: 2
    /// - max_iterations: 20
    /// - expansion: 1 (every new generation is as large as the first)
    pub fn new() -> Self {
        Self {
            capacity: 100_000,
            bucket_size: 2,
            max_iterations: 20,
            expansion: 1,
        }
    }

    /// Set the number of items the first generation should hold.
    ///
    /// The bucket count is `capacity / bucket_size` rounded up to a power of two,
    /// and at least one.
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        if capacity > MAX_CAPACITY {
            panic!("Capacity must not exceed {MAX_CAPACITY}");
        }
        self.capacity = capacity;
        self
    }

    /// Set the number of slots per bucket. Typical values are 1, 2 and 4.
    pub fn with_bucket_size(mut self, bucket_size: u16) -> Self {
        if bucket_size == 0 {
            panic!("Bucket size must be greater than 0");
        }
        self.bucket_size = bucket_size;
        self
    }

    /// Set how many displacements an insert may try before growing.
    pub fn with_max_iterations(mut self, max_iterations: u16) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the growth factor. Rounded up to a power of two when the filter is
    /// built; 0 makes the filter fixed-size.
    pub fn with_expansion(mut self, expansion: u16) -> Self {
        self.expansion = expansion;
        self
    }

    /// Get the requested capacity
    pub fn get_capacity(&self) -> u64 {
        self.capacity
    }

    /// Get the bucket size
    pub fn get_bucket_size(&self) -> u16 {
        self.bucket_size
    }

    /// Get the displacement limit
    pub fn get_max_iterations(&self) -> u16 {
        self.max_iterations
    }

    /// Get the growth factor as configured (before rounding)
    pub fn get_expansion(&self) -> u16 {
        self.expansion
    }

    /// Bucket count of the first generation.
    pub fn base_bucket_num(&self) -> u64 {
        (self.capacity / u64::from(self.bucket_size)).next_power_of_two()
    }

    /// Growth factor actually used: 0 stays 0, anything else is rounded up to a
    /// power of two that fits in `u16`.
    pub fn effective_expansion(&self) -> u16 {
        match self.expansion {
            0 => 0,
            n => n.checked_next_power_of_two().unwrap_or(1 << 15),
        }
    }
}

impl Default for LaniCuckooFilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<&FilterConfig> for LaniCuckooFilterConfig {
    type Error = LaniCuckooFilterError;

    fn try_from(settings: &FilterConfig) -> Result<Self, Self::Error> {
        if settings.bucket_size == 0 {
            return Err(LaniCuckooFilterError::InvalidConfiguration(
                "bucket_size must be greater than 0".to_string(),
            ));
        }
        if settings.capacity > MAX_CAPACITY {
            return Err(LaniCuckooFilterError::InvalidConfiguration(format!(
                "capacity must not exceed {MAX_CAPACITY}"
            )));
        }

        Ok(Self {
            capacity: settings.capacity,
            bucket_size: settings.bucket_size,
            max_iterations: settings.max_iterations,
            expansion: settings.expansion,
        })
    }
}
