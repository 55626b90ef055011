//! Security Middleware
//!
//! Axum middleware applying the domain filter and rate limiter to API routes.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use super::host_filter::{request_host, HostFilter};
use super::rate_limiter::{RateLimitDecision, RateLimiter};
use crate::error::AppError;

// == Security Middleware ==
/// State handed to [`security_layer`]: the shared domain filter and limiter.
#[derive(Debug, Clone)]
pub struct SecurityMiddleware {
    pub host_filter: Arc<HostFilter>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl SecurityMiddleware {
    /// Creates the middleware state from the app's shared filter and limiter.
    pub fn new(host_filter: Arc<HostFilter>, rate_limiter: Arc<RateLimiter>) -> Self {
        Self {
            host_filter,
            rate_limiter,
        }
    }
}

/// Rejects requests from unlisted domains, then applies the per-client limit.
pub async fn security_layer(
    State(middleware): State<SecurityMiddleware>,
    request: Request,
    next: Next,
) -> Response {
    if !middleware.host_filter.permits(request.headers()) {
        let host = request_host(request.headers()).unwrap_or_else(|| "unknown".to_string());
        warn!("Rejected request from disallowed domain {}", host);
        return AppError::Forbidden(format!("domain {} is not allowed", host)).into_response();
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client_id = client_id(request.headers(), peer);

    if let RateLimitDecision::Limited { retry_after } = middleware.rate_limiter.check(&client_id)
    {
        warn!("Rate limit exceeded for client {}", client_id);
        // Round up so clients never retry early
        let retry_after_secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        return AppError::RateLimited { retry_after_secs }.into_response();
    }

    next.run(request).await
}

/// First `X-Forwarded-For` hop, else the socket peer address, else `"unknown"`.
pub fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_id_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "127.0.0.1:5000".parse().unwrap();
        assert_eq!(client_id(&headers, Some(peer)), "203.0.113.7");
    }

    #[test]
    fn test_client_id_falls_back_to_peer() {
        let peer: SocketAddr = "192.0.2.1:5000".parse().unwrap();
        assert_eq!(client_id(&HeaderMap::new(), Some(peer)), "192.0.2.1");
        assert_eq!(client_id(&HeaderMap::new(), None), "unknown");
    }
}
