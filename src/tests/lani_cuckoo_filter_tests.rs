// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Behavioral, statistical, and property-based tests for the cuckoo filter.

use super::test_utils::{key_strategy, keys_strategy, numbered_keys};
use crate::data_structures::lani_cuckoo_filter::{
    FnvKeyedHasher, InsertStatus, LaniCuckooFilter, LaniCuckooFilterConfig,
};
use proptest::prelude::*;
use test_case::test_case;

// Constants for testing
const KEY_COUNT: u64 = 10_000;
const COLLISION_RATE_BOUND: f64 = 0.015;

fn fill(filter: &mut LaniCuckooFilter, keys: &[Vec<u8>]) {
    for key in keys {
        assert!(filter.insert(key));
    }
}

#[test]
fn test_basic_operations() {
    let mut filter = LaniCuckooFilter::new(50, 2, 20, 1);
    assert_eq!(filter.len(), 0);
    assert_eq!(filter.filter_count(), 1);

    assert!(filter.insert(b"key111"));
    assert!(filter.insert(b"key222"));
    assert!(filter.contains(b"key111"));
    assert!(filter.contains(b"key222"));
    assert!(!filter.contains(b"key333"));
    assert_eq!(filter.len(), 2);

    assert!(filter.insert(b"key333"));
    assert_eq!(filter.len(), 3);

    assert!(filter.delete(b"key111"));
    assert_eq!(filter.len(), 2);
    assert!(!filter.contains(b"key111"));
    assert!(!filter.delete(b"key111"));
    assert_eq!(filter.len(), 2);
}

#[test]
fn test_count_tracks_duplicates() {
    let mut filter = LaniCuckooFilter::new(10, 2, 20, 1);
    assert_eq!(filter.count(b"key11111"), 0);

    for expected in 1..=10 {
        assert!(filter.insert(b"key11111"));
        assert_eq!(filter.count(b"key11111"), expected);
    }
    assert_eq!(filter.len(), 10);
    // Two candidate buckets of two slots cannot hold 10 copies
    assert!(filter.filter_count() > 1);
}

#[test]
fn test_relocations_keep_every_key() {
    let keys = numbered_keys(0..1_000);
    let mut filter = LaniCuckooFilter::new(500, 4, 20, 1);

    for (i, key) in keys.iter().enumerate() {
        assert!(filter.insert(key));
        for earlier in &keys[..i] {
            assert!(filter.contains(earlier), "lost {:?} after {} inserts", earlier, i + 1);
        }
    }
    assert_eq!(filter.len(), 1_000);
    assert_eq!(filter.occupied_slots(), 1_000);
}

#[test]
fn test_single_generation_sizing() {
    let filter = LaniCuckooFilter::new(KEY_COUNT, 2, 50, 1);
    assert_eq!(filter.capacity(), 16_384);
}

#[test_case(1; "single generation")]
#[test_case(2; "half capacity")]
#[test_case(4; "quarter capacity")]
fn test_collision_rate(divisor: u64) {
    let keys = numbered_keys(0..KEY_COUNT);
    let mut filter = LaniCuckooFilter::new(KEY_COUNT / divisor, 2, 50, 1);
    fill(&mut filter, &keys);
    assert_eq!(filter.len(), KEY_COUNT);
    if divisor == 1 {
        assert_eq!(filter.filter_count(), 1);
    }

    let mut collisions = 0u32;
    for key in &keys {
        let count = filter.count(key);
        assert_ne!(count, 0);
        if count > 1 {
            collisions += 1;
        }
    }

    let bound = KEY_COUNT as f64 * COLLISION_RATE_BOUND * divisor as f64;
    assert!(
        f64::from(collisions) <= bound,
        "{collisions} collisions exceed {bound}"
    );
}

#[test_case(1; "single generation")]
#[test_case(2; "half capacity")]
#[test_case(4; "quarter capacity")]
fn test_false_positive_rate(divisor: u64) {
    let mut filter = LaniCuckooFilter::new(KEY_COUNT / divisor, 2, 50, 1);
    fill(&mut filter, &numbered_keys(0..KEY_COUNT));

    let false_positives = numbered_keys(KEY_COUNT..2 * KEY_COUNT)
        .iter()
        .filter(|key| filter.contains(key))
        .count();

    let bound = KEY_COUNT as f64 * COLLISION_RATE_BOUND * divisor as f64;
    assert!(
        false_positives as f64 <= bound,
        "{false_positives} false positives exceed {bound}"
    );
}

#[test_case(1; "doubling")]
#[test_case(2; "quadrupling")]
fn test_delete_all(expansion: u16) {
    let keys = numbered_keys(0..KEY_COUNT);
    let mut filter = LaniCuckooFilter::new(KEY_COUNT / 8, 2, 50, expansion);
    fill(&mut filter, &keys);
    assert_eq!(filter.len(), KEY_COUNT);
    assert!(filter.filter_count() > 1);

    for key in &keys {
        assert!(filter.delete(key));
    }
    assert_eq!(filter.len(), 0);
    assert!(filter.is_empty());
    assert_eq!(filter.filter_count(), 1);
    assert_eq!(filter.occupied_slots(), 0);
}

#[test_case(1, 12; "one slot per bucket")]
#[test_case(2, 11; "two slots per bucket")]
#[test_case(4, 10; "four slots per bucket")]
fn test_bucket_size_generation_count(bucket_size: u16, expected_filters: usize) {
    let mut filter = LaniCuckooFilter::new(KEY_COUNT / 10, bucket_size, 50, 1);
    fill(&mut filter, &numbered_keys(0..KEY_COUNT));
    assert_eq!(filter.bucket_size(), bucket_size);
    assert_eq!(filter.filter_count(), expected_filters);
}

#[test]
fn test_alternative_hasher() {
    let config = LaniCuckooFilterConfig::new()
        .with_capacity(1_000)
        .with_bucket_size(4);
    let mut filter = LaniCuckooFilter::with_hasher(config, FnvKeyedHasher);
    let keys = numbered_keys(0..2_000);

    for key in &keys {
        assert!(filter.insert(key));
    }
    assert!(keys.iter().all(|key| filter.contains(key)));
    assert_eq!(filter.len(), 2_000);
}

#[test]
fn test_try_insert_reports_no_space() {
    let mut filter = LaniCuckooFilter::new(4, 1, 5, 0);
    let mut failures = 0;
    for key in numbered_keys(0..64) {
        match filter.try_insert(&key) {
            Ok(status) => assert_eq!(status, InsertStatus::Inserted),
            Err(err) => {
                assert_eq!(err.to_string(), "Cuckoo filter is full and cannot grow");
                failures += 1;
            }
        }
    }
    assert!(failures >= 60);
    assert!(filter.len() <= 4);
    assert_eq!(filter.filter_count(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_inserted_keys_are_found(keys in keys_strategy(200)) {
        let mut filter = LaniCuckooFilter::new(64, 2, 20, 1);
        for key in &keys {
            prop_assert!(filter.insert(key));
        }
        prop_assert_eq!(filter.len(), keys.len() as u64);
        prop_assert_eq!(filter.occupied_slots(), keys.len());
        for key in &keys {
            let copies = keys.iter().filter(|other| *other == key).count() as u64;
            prop_assert!(filter.contains(key));
            prop_assert!(filter.count(key) >= copies);
        }
    }

    #[test]
    fn prop_insert_then_delete_restores_len(keys in keys_strategy(100), probe in key_strategy()) {
        let mut filter = LaniCuckooFilter::new(128, 4, 20, 1);
        for key in &keys {
            filter.insert(key);
        }
        let before = filter.len();

        prop_assert!(filter.insert(&probe));
        prop_assert!(filter.delete(&probe));
        prop_assert_eq!(filter.len(), before);
        prop_assert_eq!(filter.occupied_slots() as u64, before);
    }

    #[test]
    fn prop_failed_insert_changes_nothing(keys in keys_strategy(150)) {
        let mut filter = LaniCuckooFilter::new(32, 2, 10, 0);
        let mut stored = Vec::new();
        for key in &keys {
            let occupied = filter.occupied_slots();
            if filter.insert(key) {
                stored.push(key.clone());
            } else {
                prop_assert_eq!(filter.occupied_slots(), occupied);
            }
        }
        prop_assert_eq!(filter.filter_count(), 1);
        prop_assert_eq!(filter.len(), stored.len() as u64);
        for key in &stored {
            prop_assert!(filter.contains(key));
        }
    }

    #[test]
    fn prop_slot_accounting_survives_deletes(keys in keys_strategy(200)) {
        let mut filter = LaniCuckooFilter::new(32, 2, 20, 1);
        for key in &keys {
            filter.insert(key);
        }
        for key in keys.iter().step_by(2) {
            let len = filter.len();
            if filter.delete(key) {
                prop_assert_eq!(filter.len(), len - 1);
            } else {
                prop_assert_eq!(filter.len(), len);
            }
            prop_assert_eq!(filter.occupied_slots() as u64, filter.len());
        }
        filter.compact();
        prop_assert_eq!(filter.occupied_slots() as u64, filter.len());
        prop_assert_eq!(filter.deletions_since_compaction(), 0);
    }
}
