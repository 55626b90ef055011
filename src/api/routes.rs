//! API Routes
//!
//! Configures the Axum router with all cutoff server endpoints.

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    clear_handler, data_handler, health_handler, not_found_handler, stats_handler, AppState,
};
use crate::config::Config;
use crate::security::{security_layer, SecurityMiddleware};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/data` - Cutoff dataset (cached)
/// - `GET /api/cache/stats` - Cache statistics
/// - `POST /api/cache/clear` - Empty the cache and reset statistics
/// - `GET /health` - Health check endpoint
/// - anything else - static files from `config.static_dir`, or 404
///
/// # Middleware
/// - Domain restriction and rate limiting on `/api/*`
/// - Gzip compression
/// - CORS: any origin, or `config.cors_origin`
/// - Tracing: logs all requests
pub fn create_router(state: AppState, config: &Config) -> Router {
    let security =
        SecurityMiddleware::new(state.host_filter.clone(), state.rate_limiter.clone());

    let api_routes = Router::new()
        .route("/data", get(data_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/clear", post(clear_handler))
        .route_layer(middleware::from_fn_with_state(security, security_layer));

    let app = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_handler));

    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.fallback(not_found_handler),
    };

    app.layer(CompressionLayer::new())
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    match origin.map(|o| (o, o.parse::<HeaderValue>())) {
        Some((_, Ok(origin))) => cors.allow_origin(origin),
        Some((raw, Err(_))) => {
            warn!("Ignoring invalid CORS_ORIGIN {:?}, allowing any origin", raw);
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}
