// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Fixed-capacity fingerprint buckets.

use super::fingerprint::{Fingerprint, EMPTY_SLOT};

/// A fixed number of fingerprint slots.
///
/// Slot order carries no meaning for lookups, but eviction addresses slots by
/// position. The same fingerprint may occupy several slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bucket {
    slots: Box<[Fingerprint]>,
}

impl Bucket {
    /// Create a bucket of `size` empty slots.
    pub fn new(size: u16) -> Self {
        Self {
            slots: vec![EMPTY_SLOT; usize::from(size)].into_boxed_slice(),
        }
    }

    /// Whether any slot holds `fp`.
    #[inline]
    pub fn find(&self, fp: Fingerprint) -> bool {
        self.slots.iter().any(|&slot| slot == fp)
    }

    /// Clear the first slot holding `fp`. Returns whether one was found.
    #[inline]
    pub fn delete(&mut self, fp: Fingerprint) -> bool {
        match self.slots.iter_mut().find(|slot| **slot == fp) {
            Some(slot) => {
                *slot = EMPTY_SLOT;
                true
            }
            None => false,
        }
    }

    /// Number of slots holding `fp`.
    #[inline]
    pub fn count(&self, fp: Fingerprint) -> u16 {
        self.slots.iter().filter(|&&slot| slot == fp).count() as u16
    }

    /// Position of the first empty slot.
    #[inline]
    pub fn find_available_slot(&self) -> Option<usize> {
        self.slots.iter().position(|&slot| slot == EMPTY_SLOT)
    }

    /// Fingerprint stored at `slot` (`EMPTY_SLOT` if unused).
    #[inline]
    pub fn get(&self, slot: usize) -> Fingerprint {
        self.slots[slot]
    }

    /// Overwrite `slot`.
    #[inline]
    pub fn set(&mut self, slot: usize, fp: Fingerprint) {
        self.slots[slot] = fp;
    }

    /// Store `fp` at `slot` and hand back the previous occupant.
    #[inline]
    pub fn swap(&mut self, slot: usize, fp: Fingerprint) -> Fingerprint {
        std::mem::replace(&mut self.slots[slot], fp)
    }

    /// Number of non-empty slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|&&slot| slot != EMPTY_SLOT).count()
    }
}
