//! Security Module
//!
//! Request gating for the API: domain restriction and per-client rate limiting.

pub mod host_filter;
pub mod middleware;
pub mod rate_limiter;

pub use host_filter::HostFilter;
pub use middleware::{security_layer, SecurityMiddleware};
pub use rate_limiter::{RateLimitDecision, RateLimiter};
