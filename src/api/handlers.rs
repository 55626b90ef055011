//! API Handlers
//!
//! HTTP request handlers for each cutoff server endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::State,
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::cache::{CacheStore, CUTOFF_DATA_KEY};
use crate::config::Config;
use crate::data::DataSource;
use crate::error::{AppError, Result};
use crate::models::{ClearResponse, HealthResponse, StatsResponse};
use crate::security::{HostFilter, RateLimiter};

/// Header reporting whether `/api/data` was served from cache.
pub const X_CACHE: &str = "x-cache";

/// Application state shared across all handlers.
///
/// Built once at start-up; every handler reaches the one cache through it.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: Arc<RwLock<CacheStore>>,
    /// Where cache misses are loaded from
    pub data: DataSource,
    /// Per-client request limiter
    pub rate_limiter: Arc<RateLimiter>,
    /// Domain allow list
    pub host_filter: Arc<HostFilter>,
}

impl AppState {
    /// Creates a new AppState around an existing cache store.
    ///
    /// Rate limiting and domain checks use the defaults from `Config::default()`.
    pub fn new(cache: CacheStore, data: DataSource) -> Self {
        let defaults = Config::default();
        Self {
            cache: Arc::new(RwLock::new(cache)),
            data,
            rate_limiter: Arc::new(RateLimiter::new(
                defaults.rate_limit_max_requests,
                defaults.rate_limit_window(),
            )),
            host_filter: Arc::new(HostFilter::default()),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            cache: Arc::new(RwLock::new(CacheStore::new(config.cache_ttl()))),
            data: DataSource::new(config.data_file.clone()),
            rate_limiter: Arc::new(RateLimiter::new(
                config.rate_limit_max_requests,
                config.rate_limit_window(),
            )),
            host_filter: Arc::new(HostFilter::new(config.allowed_hosts.clone())),
        }
    }

    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = Arc::new(rate_limiter);
        self
    }

    pub fn with_host_filter(mut self, host_filter: HostFilter) -> Self {
        self.host_filter = Arc::new(host_filter);
        self
    }
}

/// Handler for GET /api/data
///
/// Serves the cutoff dataset, from cache when fresh, otherwise from disk.
/// A failed load leaves the cache untouched.
pub async fn data_handler(State(state): State<AppState>) -> Result<Response> {
    // Write lock: a lookup updates the hit/miss counters
    let cached = state.cache.write().await.get(CUTOFF_DATA_KEY);

    if let Some(payload) = cached {
        debug!("Cache hit for {}", CUTOFF_DATA_KEY);
        return Ok(json_payload(payload, "HIT"));
    }

    info!(
        "Cache miss for {}, loading {}",
        CUTOFF_DATA_KEY,
        state.data.path().display()
    );
    let payload = state.data.load().await?;
    state
        .cache
        .write()
        .await
        .set(CUTOFF_DATA_KEY, payload.clone());

    Ok(json_payload(payload, "MISS"))
}

fn json_payload(payload: String, cache_status: &'static str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/json"),
            (HeaderName::from_static(X_CACHE), cache_status),
        ],
        payload,
    )
        .into_response()
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for POST /api/cache/clear
///
/// Empties the cache and zeroes its counters in one step.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.cache.write().await.clear();
    info!("Cache cleared: {} entries removed", cleared);
    Json(ClearResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback when no static directory is configured.
pub async fn not_found_handler() -> AppError {
    AppError::NotFound("no such route".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    use axum::http::StatusCode;

    const TTL: Duration = Duration::from_secs(30 * 60);

    fn state_with_file(contents: &str) -> (AppState, tempfile::NamedTempFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let state = AppState::new(CacheStore::new(TTL), DataSource::new(file.path()));
        (state, file)
    }

    #[tokio::test]
    async fn test_data_handler_miss_then_hit() {
        let (state, _file) = state_with_file(r#"{"cutoffs":[]}"#);

        let first = data_handler(State(state.clone())).await.unwrap();
        assert_eq!(first.headers().get(X_CACHE).unwrap(), "MISS");

        let second = data_handler(State(state.clone())).await.unwrap();
        assert_eq!(second.headers().get(X_CACHE).unwrap(), "HIT");
        assert_eq!(
            second.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let stats = state.cache.read().await.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[tokio::test]
    async fn test_data_handler_load_failure_leaves_cache_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(
            CacheStore::new(TTL),
            DataSource::new(dir.path().join("missing.json")),
        );

        let result = data_handler(State(state.clone())).await;
        let err = result.err().unwrap();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let stats = state.cache.read().await.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.misses, 1);
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _file) = state_with_file("[]");

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.hit_rate, "0.00%");
    }

    #[tokio::test]
    async fn test_clear_handler() {
        let (state, _file) = state_with_file("[]");
        data_handler(State(state.clone())).await.unwrap();

        let response = clear_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 1);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.size, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
