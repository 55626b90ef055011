//! Response models for the cutoff server API
//!
//! DTOs serialized into HTTP response bodies.

pub mod responses;

pub use responses::{ClearResponse, ErrorResponse, HealthResponse, StatsResponse};
