// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Main implementation of the Lani Cuckoo Filter.

use serde::Serialize;
use tracing::{debug, warn};

use crate::data_structures::lani_cuckoo_filter::config::LaniCuckooFilterConfig;
use crate::data_structures::lani_cuckoo_filter::error::{LaniCuckooFilterError, Result};
use crate::data_structures::lani_cuckoo_filter::fingerprint::{
    alt_hash, CuckooParams, Fingerprint, EMPTY_SLOT,
};
use crate::data_structures::lani_cuckoo_filter::hash::{KeyedHasher, Murmur64A};
use crate::data_structures::lani_cuckoo_filter::sub_filter::{SlotIndex, SubFilter};

/// Upper bound on the number of generations.
const MAX_SUB_FILTERS: usize = u16::MAX as usize;

/// Outcome of an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertStatus {
    /// The fingerprint was stored
    Inserted,
    /// `insert_unique` found the key already present and changed nothing
    AlreadyExists,
    /// No slot was available and the filter could not grow
    NoSpace,
}

impl InsertStatus {
    /// Whether the call left the key in the filter.
    pub fn is_success(self) -> bool {
        !matches!(self, Self::NoSpace)
    }
}

/// Point-in-time summary of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaniCuckooFilterInfo {
    /// Bytes of fingerprint storage
    pub size_bytes: usize,
    /// Buckets across all generations
    pub bucket_count: u64,
    /// Number of generations
    pub filter_count: usize,
    /// Fingerprints currently stored
    pub items_inserted: u64,
    /// Deletions since the last compaction
    pub items_deleted: u64,
    /// Slots per bucket
    pub bucket_size: u16,
    /// Growth factor after rounding
    pub expansion: u16,
    /// Displacement limit per insert
    pub max_iterations: u16,
}

/// Result of moving one slot into an older generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    Empty,
    Moved,
    Failed,
}

/// A scalable cuckoo filter over byte keys.
///
/// Keys are reduced to 8-bit fingerprints stored in one of two candidate
/// buckets. When the newest generation has no room, even after displacing
/// existing fingerprints, a larger generation is appended. Deletions eventually
/// trigger compaction, which moves fingerprints from newer generations back into
/// older ones and frees the newest generation once it is empty.
///
/// Lookups can report false positives (about `2 * bucket_size / 256` per
/// generation) but never false negatives. Inserting a key several times stores
/// several fingerprints, which [`count`](Self::count) reports.
///
/// The filter has no interior synchronization; wrap it in a lock to share it.
///
/// # Type Parameters
///
/// * `H` - The keyed hash function. Defaults to [`Murmur64A`].
///
/// # Examples
///
/// ```
/// use mauka_cuckoo_lib::data_structures::lani_cuckoo_filter::{
///     LaniCuckooFilter, LaniCuckooFilterConfig,
/// };
///
/// let mut filter = LaniCuckooFilter::new(1_000, 2, 20, 1);
/// assert!(filter.insert(b"hello"));
/// assert!(filter.contains(b"hello"));
/// assert_eq!(filter.count(b"hello"), 1);
///
/// assert!(filter.delete(b"hello"));
/// assert!(!filter.delete(b"hello"));
///
/// // Fixed-size filter
/// let config = LaniCuckooFilterConfig::new()
///     .with_capacity(10_000)
///     .with_bucket_size(4)
///     .with_expansion(0);
/// let fixed = LaniCuckooFilter::with_config(config);
/// assert_eq!(fixed.filter_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LaniCuckooFilter<H = Murmur64A> {
    /// Bucket count of generation 0
    base_bucket_num: u64,

    /// Slots per bucket, shared by every generation
    bucket_size: u16,

    /// Displacement limit for one insert
    max_iterations: u16,

    /// Power-of-two growth factor, 0 when growth is disabled
    expansion: u16,

    /// Stored fingerprints (not distinct keys)
    item_num: u64,

    /// Deletions since the last compaction
    delete_num: u64,

    /// Generations, oldest first. Never empty.
    filters: Vec<SubFilter>,

    /// Hash function for keys
    hasher: H,
}

impl LaniCuckooFilter<Murmur64A> {
    /// Create a filter sized for `capacity` items.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Items the first generation should hold
    /// * `bucket_size` - Slots per bucket (1, 2 or 4 are typical)
    /// * `max_iterations` - Displacements tried before growing
    /// * `expansion` - Growth factor between generations; 0 disables growth
    ///
    /// # Panics
    ///
    /// Panics if `bucket_size` is 0 or `capacity` exceeds
    /// [`MAX_CAPACITY`](crate::data_structures::lani_cuckoo_filter::MAX_CAPACITY).
    pub fn new(capacity: u64, bucket_size: u16, max_iterations: u16, expansion: u16) -> Self {
        Self::with_config(
            LaniCuckooFilterConfig::new()
                .with_capacity(capacity)
                .with_bucket_size(bucket_size)
                .with_max_iterations(max_iterations)
                .with_expansion(expansion),
        )
    }

    /// Create a filter with the given configuration and the default hasher.
    pub fn with_config(config: LaniCuckooFilterConfig) -> Self {
        Self::with_hasher(config, Murmur64A)
    }
}

impl<H: KeyedHasher> LaniCuckooFilter<H> {
    /// Create a filter with the given configuration and hash function.
    pub fn with_hasher(config: LaniCuckooFilterConfig, hasher: H) -> Self {
        let base_bucket_num = config.base_bucket_num();
        let bucket_size = config.get_bucket_size();
        Self {
            base_bucket_num,
            bucket_size,
            max_iterations: config.get_max_iterations(),
            expansion: config.effective_expansion(),
            item_num: 0,
            delete_num: 0,
            filters: vec![SubFilter::new(base_bucket_num, bucket_size)],
            hasher,
        }
    }

    /// Add a key.
    ///
    /// Returns `false` only when there is no room and the filter cannot grow.
    /// Adding a key that is already present stores another copy.
    pub fn insert(&mut self, key: &[u8]) -> bool {
        let params = CuckooParams::derive(&self.hasher, key);
        self.insert_params(&params).is_success()
    }

    /// Add a key, reporting a full filter as an error.
    pub fn try_insert(&mut self, key: &[u8]) -> Result<InsertStatus> {
        let params = CuckooParams::derive(&self.hasher, key);
        match self.insert_params(&params) {
            InsertStatus::NoSpace => Err(LaniCuckooFilterError::NoSpace),
            status => Ok(status),
        }
    }

    /// Add a key unless it (or a colliding key) is already present.
    pub fn insert_unique(&mut self, key: &[u8]) -> InsertStatus {
        let params = CuckooParams::derive(&self.hasher, key);
        if self.contains_params(&params) {
            return InsertStatus::AlreadyExists;
        }
        self.insert_params(&params)
    }

    /// Remove one copy of a key.
    ///
    /// Returns `false`, without touching the filter, if the key is absent.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        let params = CuckooParams::derive(&self.hasher, key);
        if !self.filters.iter_mut().rev().any(|filter| filter.delete(&params)) {
            return false;
        }

        self.item_num -= 1;
        self.delete_num += 1;
        if self.filters.len() > 1 && self.delete_num.saturating_mul(10) > self.item_num {
            self.compact_generations(false);
        }
        true
    }

    /// Whether the key may be present. Never `false` for a stored key.
    pub fn contains(&self, key: &[u8]) -> bool {
        let params = CuckooParams::derive(&self.hasher, key);
        self.contains_params(&params)
    }

    /// Number of stored copies of the key's fingerprint across all generations.
    pub fn count(&self, key: &[u8]) -> u64 {
        let params = CuckooParams::derive(&self.hasher, key);
        self.filters
            .iter()
            .map(|filter| u64::from(filter.count(&params)))
            .sum()
    }

    /// Move fingerprints into older generations wherever possible and free
    /// every trailing generation left empty.
    pub fn compact(&mut self) {
        self.compact_generations(true);
    }

    /// Number of stored fingerprints.
    pub fn len(&self) -> u64 {
        self.item_num
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.item_num == 0
    }

    /// Deletions since the last compaction.
    pub fn deletions_since_compaction(&self) -> u64 {
        self.delete_num
    }

    /// Number of generations.
    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    /// Buckets across all generations.
    pub fn bucket_count(&self) -> u64 {
        self.filters.iter().map(SubFilter::bucket_num).sum()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> u64 {
        self.bucket_count() * u64::from(self.bucket_size)
    }

    /// Slots per bucket.
    pub fn bucket_size(&self) -> u16 {
        self.bucket_size
    }

    /// Displacement limit per insert.
    pub fn max_iterations(&self) -> u16 {
        self.max_iterations
    }

    /// Growth factor after power-of-two rounding; 0 when growth is disabled.
    pub fn expansion(&self) -> u16 {
        self.expansion
    }

    /// Bytes used by fingerprint slots.
    pub fn memory_usage(&self) -> usize {
        self.capacity() as usize * std::mem::size_of::<Fingerprint>()
    }

    /// Snapshot of the filter's shape and counters.
    pub fn info(&self) -> LaniCuckooFilterInfo {
        LaniCuckooFilterInfo {
            size_bytes: self.memory_usage(),
            bucket_count: self.bucket_count(),
            filter_count: self.filters.len(),
            items_inserted: self.item_num,
            items_deleted: self.delete_num,
            bucket_size: self.bucket_size,
            expansion: self.expansion,
            max_iterations: self.max_iterations,
        }
    }

    fn contains_params(&self, params: &CuckooParams) -> bool {
        self.filters.iter().any(|filter| filter.find(params))
    }

    fn insert_params(&mut self, params: &CuckooParams) -> InsertStatus {
        loop {
            if let Some((filter_ix, at)) = self.find_available_slot(params) {
                self.filters[filter_ix].place(at, params);
                self.item_num += 1;
                return InsertStatus::Inserted;
            }

            let max_iterations = self.max_iterations;
            let bucket_size = self.bucket_size;
            if let Some(newest) = self.filters.last_mut() {
                if evict_and_insert(newest, params, max_iterations, bucket_size) {
                    self.item_num += 1;
                    return InsertStatus::Inserted;
                }
            }

            // A fresh generation has both candidate buckets empty, so the
            // next pass always succeeds.
            if self.expansion == 0 || !self.grow() {
                warn!(
                    items = self.item_num,
                    filters = self.filters.len(),
                    "Cuckoo filter has no space left"
                );
                return InsertStatus::NoSpace;
            }
        }
    }

    /// First free candidate slot, newest generation first.
    fn find_available_slot(&self, params: &CuckooParams) -> Option<(usize, SlotIndex)> {
        self.filters
            .iter()
            .enumerate()
            .rev()
            .find_map(|(filter_ix, filter)| {
                filter
                    .find_available_slot(params)
                    .map(|at| (filter_ix, at))
            })
    }

    /// Append a generation of `base * expansion^n` buckets, where `n` is the
    /// current generation count. Refuses when that count overflows.
    fn grow(&mut self) -> bool {
        if self.filters.len() >= MAX_SUB_FILTERS {
            return false;
        }
        let generation = self.filters.len() as u32;
        let bucket_num = u64::from(self.expansion)
            .checked_pow(generation)
            .and_then(|growth| growth.checked_mul(self.base_bucket_num))
            .filter(|&n| usize::try_from(n).is_ok());
        let Some(bucket_num) = bucket_num else {
            return false;
        };

        debug!(generation, bucket_num, "Adding cuckoo filter generation");
        self.filters.push(SubFilter::new(bucket_num, self.bucket_size));
        true
    }

    /// Drain generations from the newest down to 1. With `cont` false the pass
    /// stops at the first generation that cannot be emptied, since nothing
    /// below it can be freed either.
    fn compact_generations(&mut self, cont: bool) {
        for filter_ix in (1..self.filters.len()).rev() {
            if !self.compact_single(filter_ix) && !cont {
                break;
            }
        }
        self.delete_num = 0;
        debug!(
            filters = self.filters.len(),
            items = self.item_num,
            "Cuckoo filter compaction finished"
        );
    }

    /// Move every fingerprint of generation `filter_ix` into an older one.
    /// Frees the generation if it ends up empty and is the newest.
    fn compact_single(&mut self, filter_ix: usize) -> bool {
        let bucket_size = usize::from(self.bucket_size);
        let (older, rest) = self.filters.split_at_mut(filter_ix);
        let current = &mut rest[0];

        let mut drained = true;
        for bucket_ix in 0..current.bucket_num() as usize {
            for slot_ix in 0..bucket_size {
                if relocate_slot(older, current, bucket_ix, slot_ix) == Relocation::Failed {
                    drained = false;
                }
            }
        }

        if drained && filter_ix == self.filters.len() - 1 {
            self.filters.pop();
            debug!(generation = filter_ix, "Freed empty cuckoo filter generation");
        }
        drained
    }

    #[cfg(test)]
    pub(crate) fn occupied_slots(&self) -> usize {
        self.filters.iter().map(SubFilter::occupied).sum()
    }
}

/// Place the fingerprint in the newest generation by displacing occupants
/// along a bounded walk.
///
/// Starting at the `h1` bucket, each step writes the incoming fingerprint into
/// slot `victim`, picks up the previous occupant and moves to that occupant's
/// alternate bucket. The walk ends as soon as that bucket has a free slot. If
/// `max_iterations` steps pass without one, the swaps are undone in reverse and
/// the generation is left exactly as it was.
fn evict_and_insert(
    filter: &mut SubFilter,
    params: &CuckooParams,
    max_iterations: u16,
    bucket_size: u16,
) -> bool {
    let bucket_num = filter.bucket_num();
    let bucket_size = usize::from(bucket_size);
    let mut fp = params.fp;
    let mut victim = 0usize;
    let mut p = params.h1 % bucket_num;

    for _ in 0..max_iterations {
        fp = filter.bucket_mut(p as usize).swap(victim, fp);
        p = alt_hash(fp, p) % bucket_num;

        let bucket = filter.bucket_mut(p as usize);
        if let Some(slot) = bucket.find_available_slot() {
            bucket.set(slot, fp);
            return true;
        }
        victim = (victim + 1) % bucket_size;
    }

    for _ in 0..max_iterations {
        victim = (victim + bucket_size - 1) % bucket_size;
        p = alt_hash(fp, p) % bucket_num;
        fp = filter.bucket_mut(p as usize).swap(victim, fp);
    }
    assert_eq!(
        fp, params.fp,
        "eviction rollback did not restore the displaced fingerprints"
    );

    debug!(max_iterations, "Eviction walk exhausted, rolled back");
    false
}

/// Move one slot of `current` into the oldest generation with room.
fn relocate_slot(
    older: &mut [SubFilter],
    current: &mut SubFilter,
    bucket_ix: usize,
    slot_ix: usize,
) -> Relocation {
    let fp = current.bucket(bucket_ix).get(slot_ix);
    if fp == EMPTY_SLOT {
        return Relocation::Empty;
    }

    let params = CuckooParams::for_stored(fp, bucket_ix as u64);
    for filter in older.iter_mut() {
        if let Some(at) = filter.find_available_slot(&params) {
            filter.place(at, &params);
            current.bucket_mut(bucket_ix).set(slot_ix, EMPTY_SLOT);
            return Relocation::Moved;
        }
    }
    Relocation::Failed
}
