//! Cutoff Server - serves college-admission cutoff data over HTTP
//!
//! The dataset is read from disk and held in a TTL cache with hit/miss
//! statistics; a background task sweeps expired entries.

pub mod api;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod security;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::{spawn_sweep_task, SweepHandle};
