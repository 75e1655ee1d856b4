//! Test modules for the Mauka cuckoo filter library.
//!
//! This module contains the crate-internal test suites:
//! - Behavioral and statistical tests for the cuckoo filter
//! - Property-based tests using proptest
//! - Configuration loading and error handling tests
//! - Shared fixtures and strategies

pub mod lani_cuckoo_filter_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{create_test_dir, key_strategy, keys_strategy, numbered_keys, TestFixture};
