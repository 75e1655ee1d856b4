// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the Lani Cuckoo Filter.

/// Errors that can occur in Lani Cuckoo Filter operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum LaniCuckooFilterError {
    /// No slot could be found and the filter is not allowed to grow
    #[error("Cuckoo filter is full and cannot grow")]
    NoSpace,

    /// The filter parameters are out of range
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for Lani Cuckoo Filter operations
pub type Result<T> = std::result::Result<T, LaniCuckooFilterError>;
