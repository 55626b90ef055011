//! Cache Store Module
//!
//! HashMap storage with a fixed TTL, lazy expiry on read, and hit/miss stats.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Cache Store ==
/// In-memory payload cache with a single TTL for every entry.
///
/// None of the operations can fail. Callers that need sharing wrap the store
/// in `Arc<RwLock<_>>`; every mutating method takes `&mut self`, so a clear
/// or a counted lookup is never observed half-done.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup counters (`size` is filled in on snapshot)
    stats: CacheStats,
    /// How long an entry stays valid
    ttl: Duration,
    /// Time source for stamping and expiry
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store using the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store reading time from `clock`.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
            clock,
        }
    }

    // == Get ==
    /// Looks up a fresh value by key.
    ///
    /// Every call counts as exactly one hit or one miss. A stale entry is a
    /// miss and stays in the table until the next sweep.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let now = self.clock.now_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now, self.ttl) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key`, stamping it with the current time.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let entry = CacheEntry::new(value.into(), self.clock.now_ms());
        self.entries.insert(key.into(), entry);
    }

    // == Sweep ==
    /// Removes every expired entry and returns how many were dropped.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_ms();
        let ttl = self.ttl;
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now, ttl));

        before - self.entries.len()
    }

    // == Clear ==
    /// Drops all entries and zeroes the counters. Returns the prior entry count.
    pub fn clear(&mut self) -> usize {
        let cleared = self.entries.len();
        self.entries.clear();
        self.stats.reset();
        cleared
    }

    // == Stats ==
    /// Snapshot of the counters and current entry count.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats
    }

    // == Length ==
    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
