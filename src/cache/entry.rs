//! Cache Entry Module
//!
//! A cached payload and the time it was stored.

use std::time::Duration;

// == Cache Entry ==
/// A single cached payload. Replaced wholesale on overwrite, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored payload, served verbatim
    pub value: String,
    /// When the entry was stored (Unix milliseconds)
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with `now_ms`.
    pub fn new(value: String, now_ms: u64) -> Self {
        Self {
            value,
            stored_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds since the entry was stored. Saturates at 0 if the clock
    /// reads earlier than `stored_at`.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `ttl`.
    ///
    /// An entry is valid only while `now - stored_at < ttl`, so it is expired
    /// from the instant its age reaches the TTL.
    pub fn is_expired(&self, now_ms: u64, ttl: Duration) -> bool {
        self.age_ms(now_ms) >= ttl.as_millis() as u64
    }
}
