//! Cache Statistics Module
//!
//! Tracks lookup hits and misses against the cache.

// == Cache Stats ==
/// Lookup counters plus the entry count at snapshot time.
///
/// `total_requests` always equals `hits + misses`; both recorders bump it in
/// the same call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups that returned a fresh value
    pub hits: u64,
    /// Lookups that found nothing or only a stale entry
    pub misses: u64,
    /// Every lookup, hit or miss
    pub total_requests: u64,
    /// Entries in the table, including expired ones not yet swept
    pub size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a percentage in `0.0..=100.0`, or 0.0 with no lookups yet.
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64 * 100.0
        }
    }

    /// Hit rate rendered with two decimals, e.g. `"50.00%"`.
    pub fn hit_rate_display(&self) -> String {
        format!("{:.2}%", self.hit_rate())
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
        self.total_requests += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
        self.total_requests += 1;
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
