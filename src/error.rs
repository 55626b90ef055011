//! Error types for the cutoff server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Errors surfaced to HTTP clients. The cache itself never fails.
#[derive(Error, Debug)]
pub enum AppError {
    /// The dataset could not be loaded
    #[error("Failed to load data: {0}")]
    DataSource(String),

    /// Client exceeded its request allowance
    #[error("Too many requests, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Request came from a domain that is not allowed
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// No such resource
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        match self {
            AppError::RateLimited { retry_after_secs } => (
                status,
                [(axum::http::header::RETRY_AFTER, retry_after_secs.to_string())],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cutoff server.
pub type Result<T> = std::result::Result<T, AppError>;
