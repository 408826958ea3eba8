//! Error types for the storefront service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::upstream::UpstreamError;

// == App Error Enum ==
/// Failure of a pipeline or of service startup.
#[derive(Error, Debug)]
pub enum AppError {
    /// The upstream source could not be reached or answered with an error
    #[error("Upstream fetch failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// A background fetch task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, AppError>;

// == Api Error Enum ==
/// Error returned by HTTP handlers, mapped to a status code and error code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// `location_id` query parameter missing or empty
    #[error("location_id is required")]
    MissingLocationId,

    /// No category has items at the requested location
    #[error("No categories found for the given location with items")]
    CategoriesNotFound,

    /// A pipeline call failed
    #[error("{message}")]
    FetchFailed {
        message: &'static str,
        code: &'static str,
        #[source]
        source: AppError,
    },
}

impl ApiError {
    pub fn fetch_failed(message: &'static str, code: &'static str, source: AppError) -> Self {
        ApiError::FetchFailed {
            message,
            code,
            source,
        }
    }

    /// Machine-readable error code included in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingLocationId => "MISSING_LOCATION_ID",
            ApiError::CategoriesNotFound => "CATEGORIES_NOT_FOUND",
            ApiError::FetchFailed { code, .. } => *code,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingLocationId => StatusCode::BAD_REQUEST,
            ApiError::CategoriesNotFound => StatusCode::NOT_FOUND,
            ApiError::FetchFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::FetchFailed { source, code, .. } = &self {
            tracing::error!("{}: {}", code, source);
        }

        let body = Json(ErrorResponse::new(self.to_string(), self.code()));
        (self.status(), body).into_response()
    }
}
