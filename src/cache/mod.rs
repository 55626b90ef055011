//! Cache Module
//!
//! In-memory payload caching with TTL expiry and hit/miss statistics.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Default lifetime of a cached entry (30 minutes)
pub const DEFAULT_TTL_SECS: u64 = 30 * 60;

/// Default period between expiry sweeps (10 minutes)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 10 * 60;

/// Key under which the cutoff dataset is cached
pub const CUTOFF_DATA_KEY: &str = "cutoff_data";
