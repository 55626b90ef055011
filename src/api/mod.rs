//! API Module
//!
//! HTTP handlers and routing for the cutoff server.
//!
//! # Endpoints
//! - `GET /api/data` - Cutoff dataset, served through the cache
//! - `GET /api/cache/stats` - Cache statistics
//! - `POST /api/cache/clear` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
