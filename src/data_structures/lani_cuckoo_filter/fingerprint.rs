// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fingerprint and candidate-index derivation.
//!
//! A key is reduced to one 64-bit hash. The fingerprint is `hash % 255 + 1`, so
//! it is never the empty sentinel, and the two candidate positions are `h1 = hash`
//! and `h2 = alt_hash(fp, h1)`. Because `alt_hash` is an XOR with a value that
//! depends only on the fingerprint, applying it to either candidate yields the
//! other one. Eviction and compaction rely on this to move a stored fingerprint
//! without knowing the key it came from.
//!
//! Bucket counts are always powers of two, so the symmetry survives reduction:
//! `alt_hash(fp, i) % n` and `alt_hash(fp, i % n) % n` agree.

use super::hash::KeyedHasher;

/// An 8-bit key tag. `0` is reserved for empty slots.
pub(crate) type Fingerprint = u8;

/// Slot value marking an unused slot.
pub(crate) const EMPTY_SLOT: Fingerprint = 0;

/// Odd multiplier spreading a fingerprint over the index space (MurmurHash2's `m`).
const ALT_HASH_MULTIPLIER: u64 = 0x5bd1_e995;

/// Seed used for the single key hash.
const KEY_HASH_SEED: u64 = 0;

/// Everything an operation needs to locate a key: its fingerprint and both
/// candidate hashes (not yet reduced modulo a bucket count).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CuckooParams {
    pub h1: u64,
    pub h2: u64,
    pub fp: Fingerprint,
}

impl CuckooParams {
    /// Derive the parameters of a caller key.
    pub fn derive<H: KeyedHasher + ?Sized>(hasher: &H, key: &[u8]) -> Self {
        let hash = hasher.hash(key, KEY_HASH_SEED);
        // Range is [1, 255]
        let fp = (hash % 255 + 1) as Fingerprint;
        Self {
            h1: hash,
            h2: alt_hash(fp, hash),
            fp,
        }
    }

    /// Rebuild the parameters of a fingerprint already stored at `bucket_index`.
    ///
    /// `bucket_index` stands in for `h1`; the result has the same two candidate
    /// buckets as the original key in any generation of equal or smaller size.
    pub fn for_stored(fp: Fingerprint, bucket_index: u64) -> Self {
        Self {
            h1: bucket_index,
            h2: alt_hash(fp, bucket_index),
            fp,
        }
    }
}

/// Partial-key cuckoo alternate index. Self-inverse for a fixed `fp`.
#[inline]
pub(crate) fn alt_hash(fp: Fingerprint, index: u64) -> u64 {
    index ^ u64::from(fp).wrapping_mul(ALT_HASH_MULTIPLIER)
}
