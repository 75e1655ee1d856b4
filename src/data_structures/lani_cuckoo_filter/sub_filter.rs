// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! One generation of the scalable filter.

use super::bucket::Bucket;
use super::fingerprint::CuckooParams;

/// Location of a slot inside a [`SubFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SlotIndex {
    pub bucket: usize,
    pub slot: usize,
}

/// A power-of-two array of equally sized buckets. Its shape never changes after
/// creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubFilter {
    bucket_num: u64,
    buckets: Vec<Bucket>,
}

impl SubFilter {
    /// Allocate `bucket_num` empty buckets of `bucket_size` slots each.
    pub fn new(bucket_num: u64, bucket_size: u16) -> Self {
        debug_assert!(bucket_num.is_power_of_two());
        let buckets = (0..bucket_num).map(|_| Bucket::new(bucket_size)).collect();
        Self {
            bucket_num,
            buckets,
        }
    }

    /// Number of buckets.
    #[inline]
    pub fn bucket_num(&self) -> u64 {
        self.bucket_num
    }

    /// Reduce a candidate hash to a bucket position.
    #[inline]
    pub fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.bucket_num) as usize
    }

    #[inline]
    fn candidates(&self, params: &CuckooParams) -> [usize; 2] {
        [self.bucket_index(params.h1), self.bucket_index(params.h2)]
    }

    /// Whether either candidate bucket holds the fingerprint.
    pub fn find(&self, params: &CuckooParams) -> bool {
        let [p1, p2] = self.candidates(params);
        self.buckets[p1].find(params.fp) || self.buckets[p2].find(params.fp)
    }

    /// Remove one copy of the fingerprint, first candidate first.
    pub fn delete(&mut self, params: &CuckooParams) -> bool {
        let [p1, p2] = self.candidates(params);
        self.buckets[p1].delete(params.fp) || self.buckets[p2].delete(params.fp)
    }

    /// Copies of the fingerprint in the candidate buckets.
    ///
    /// Both candidates reduce to the same bucket when the bucket count divides
    /// `fp * C`; that bucket is counted once.
    pub fn count(&self, params: &CuckooParams) -> u32 {
        let [p1, p2] = self.candidates(params);
        let first = u32::from(self.buckets[p1].count(params.fp));
        if p1 == p2 {
            first
        } else {
            first + u32::from(self.buckets[p2].count(params.fp))
        }
    }

    /// First empty slot in the `h1` bucket, then in the `h2` bucket.
    pub fn find_available_slot(&self, params: &CuckooParams) -> Option<SlotIndex> {
        self.candidates(params).into_iter().find_map(|bucket| {
            self.buckets[bucket]
                .find_available_slot()
                .map(|slot| SlotIndex { bucket, slot })
        })
    }

    /// Write the fingerprint into a slot found by `find_available_slot`.
    #[inline]
    pub fn place(&mut self, at: SlotIndex, params: &CuckooParams) {
        self.buckets[at.bucket].set(at.slot, params.fp);
    }

    #[inline]
    pub fn bucket(&self, index: usize) -> &Bucket {
        &self.buckets[index]
    }

    #[inline]
    pub fn bucket_mut(&mut self, index: usize) -> &mut Bucket {
        &mut self.buckets[index]
    }

    /// Number of non-empty slots across all buckets.
    pub fn occupied(&self) -> usize {
        self.buckets.iter().map(Bucket::occupied).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::lani_cuckoo_filter::fingerprint::alt_hash;

    fn params_at(fp: u8, h1: u64) -> CuckooParams {
        CuckooParams {
            h1,
            h2: alt_hash(fp, h1),
            fp,
        }
    }

    #[test]
    fn test_bucket_index_wraps() {
        let filter = SubFilter::new(8, 2);
        assert_eq!(filter.bucket_index(3), 3);
        assert_eq!(filter.bucket_index(8), 0);
        assert_eq!(filter.bucket_index(u64::MAX), 7);
    }

    #[test]
    fn test_place_find_delete() {
        let mut filter = SubFilter::new(16, 2);
        let params = params_at(9, 5);

        assert!(!filter.find(&params));
        let at = filter.find_available_slot(&params).unwrap();
        assert_eq!(at, SlotIndex { bucket: 5, slot: 0 });
        filter.place(at, &params);

        assert!(filter.find(&params));
        assert_eq!(filter.count(&params), 1);
        assert_eq!(filter.occupied(), 1);

        assert!(filter.delete(&params));
        assert!(!filter.find(&params));
        assert!(!filter.delete(&params));
        assert_eq!(filter.occupied(), 0);
    }

    #[test]
    fn test_available_slot_falls_back_to_second_candidate() {
        let mut filter = SubFilter::new(16, 1);
        let params = params_at(9, 5);
        let p2 = filter.bucket_index(params.h2);
        assert_ne!(p2, 5);

        filter.bucket_mut(5).set(0, 200);
        assert_eq!(
            filter.find_available_slot(&params),
            Some(SlotIndex { bucket: p2, slot: 0 })
        );

        filter.bucket_mut(p2).set(0, 201);
        assert_eq!(filter.find_available_slot(&params), None);
    }

    #[test]
    fn test_count_sums_both_candidates() {
        let mut filter = SubFilter::new(16, 2);
        let params = params_at(9, 5);
        let p2 = filter.bucket_index(params.h2);

        filter.bucket_mut(5).set(0, 9);
        filter.bucket_mut(5).set(1, 9);
        filter.bucket_mut(p2).set(1, 9);
        assert_eq!(filter.count(&params), 3);
        assert_eq!(filter.bucket(5).count(9), 2);
    }

    #[test]
    fn test_coinciding_candidates_are_counted_once() {
        let mut filter = SubFilter::new(1, 2);
        let params = params_at(9, 5);
        let at = filter.find_available_slot(&params).unwrap();
        filter.place(at, &params);
        assert_eq!(filter.count(&params), 1);

        let at = filter.find_available_slot(&params).unwrap();
        filter.place(at, &params);
        assert_eq!(filter.count(&params), 2);
        assert!(filter.delete(&params));
        assert!(filter.delete(&params));
        assert_eq!(filter.count(&params), 0);
        assert!(!filter.find(&params));
    }
}
