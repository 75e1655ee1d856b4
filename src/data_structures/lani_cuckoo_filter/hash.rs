// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Keyed hash functions for the Lani Cuckoo Filter.
//!
//! The filter never hashes keys itself; it asks a [`KeyedHasher`] for a 64-bit
//! digest of the raw key bytes under a seed. Any implementation works as long as
//! the same key and seed always produce the same digest, otherwise lookups stop
//! finding what inserts stored.

use std::hash::Hasher;

/// A deterministic, seedable 64-bit hash over byte keys.
#[cfg_attr(test, mockall::automock)]
pub trait KeyedHasher {
    /// Hash `key` under `seed`.
    fn hash(&self, key: &[u8], seed: u64) -> u64;
}

/// MurmurHash64A, the default hasher of the filter.
///
/// Fingerprint statistics (false positive rate, generation counts for a given
/// fill) are calibrated against this function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Murmur64A;

impl KeyedHasher for Murmur64A {
    #[inline]
    fn hash(&self, key: &[u8], seed: u64) -> u64 {
        murmur_hash64a(key, seed)
    }
}

/// FNV-1a keyed by its offset basis.
///
/// The seed is XORed into the standard offset basis, so seed `0` yields plain
/// FNV-1a. Cheaper than [`Murmur64A`] on short keys but with weaker mixing in the
/// low bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FnvKeyedHasher;

/// Standard 64-bit FNV offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

impl KeyedHasher for FnvKeyedHasher {
    #[inline]
    fn hash(&self, key: &[u8], seed: u64) -> u64 {
        let mut hasher = fnv::FnvHasher::with_key(FNV_OFFSET_BASIS ^ seed);
        hasher.write(key);
        hasher.finish()
    }
}

/// Computes MurmurHash64A of `data` under `seed`.
///
/// Blocks are read little-endian, matching the reference implementation on
/// x86-64.
#[allow(clippy::unreadable_literal)]
pub fn murmur_hash64a(data: &[u8], seed: u64) -> u64 {
    const M: u64 = 0xc6a4a7935bd1e995;
    const R: u32 = 47;

    let mut h = seed ^ (data.len() as u64).wrapping_mul(M);

    let mut blocks = data.chunks_exact(8);
    for block in &mut blocks {
        let mut word = [0u8; 8];
        word.copy_from_slice(block);
        let mut k = u64::from_le_bytes(word);

        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        for (i, &byte) in tail.iter().enumerate() {
            h ^= u64::from(byte) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;

    h
}
