// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Lani Cuckoo Filter for membership pre-checks.
//!
//! A scalable cuckoo filter answering "have I possibly seen this key?" before an
//! expensive disk or network lookup. Unlike a Bloom filter it supports deletion
//! and counts repeated insertions of the same key.
//!
//! # Features
//!
//! - 8-bit fingerprints in buckets of configurable size, two candidate buckets
//!   per key (partial-key cuckoo hashing).
//! - Bounded displacement on collisions, fully rolled back when it fails.
//! - Grows by appending larger generations instead of rehashing.
//! - Compaction moves fingerprints back into older generations after
//!   deletions and frees generations that become empty.
//! - Pluggable keyed hash function ([`KeyedHasher`]).
//!
//! # Example
//!
//! ```
//! use mauka_cuckoo_lib::data_structures::lani_cuckoo_filter::{InsertStatus, LaniCuckooFilter};
//!
//! let mut filter = LaniCuckooFilter::new(10_000, 2, 20, 1);
//!
//! assert!(filter.insert(b"user:42"));
//! assert!(filter.contains(b"user:42"));
//!
//! // Duplicates are counted
//! assert!(filter.insert(b"user:42"));
//! assert_eq!(filter.count(b"user:42"), 2);
//!
//! // ...unless the caller asks otherwise
//! assert_eq!(filter.insert_unique(b"user:42"), InsertStatus::AlreadyExists);
//!
//! assert!(filter.delete(b"user:42"));
//! assert_eq!(filter.count(b"user:42"), 1);
//! ```
//!
//! # Lookup Pre-check
//!
//! The typical use is skipping a slow lookup for keys that were never written:
//!
//! ```
//! use mauka_cuckoo_lib::data_structures::lani_cuckoo_filter::LaniCuckooFilter;
//!
//! struct Store {
//!     filter: LaniCuckooFilter,
//!     // ... backing storage ...
//! }
//!
//! impl Store {
//!     fn put(&mut self, key: &[u8]) {
//!         self.filter.insert(key);
//!         // write to storage
//!     }
//!
//!     fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
//!         if !self.filter.contains(key) {
//!             // Definitely absent, no need to touch storage
//!             return None;
//!         }
//!         // read from storage
//!         None
//!     }
//! }
//! ```

// Module declarations
mod bucket;
mod config;
mod error;
mod filter;
mod fingerprint;
mod hash;
mod sub_filter;

// Re-exports
pub use config::{LaniCuckooFilterConfig, MAX_CAPACITY};
pub use error::{LaniCuckooFilterError, Result};
pub use filter::{InsertStatus, LaniCuckooFilter, LaniCuckooFilterInfo};
pub use hash::{murmur_hash64a, FnvKeyedHasher, KeyedHasher, Murmur64A};

#[cfg(test)]
pub(crate) use hash::MockKeyedHasher;
