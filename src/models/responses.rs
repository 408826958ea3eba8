//! Response DTOs for the storefront API
//!
//! Envelope and status bodies. Catalog payloads live in `models::catalog`.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// Active cache backend ("memory" or "redis")
    pub cache_backend: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_backend: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            cache_backend: cache_backend.into(),
        }
    }
}

/// Response body for cache invalidation (DELETE /api/cache)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Location whose views were invalidated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// Prefix that was invalidated, absent for a full clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Number of entries removed, absent for a full clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl InvalidateResponse {
    pub fn location(location_id: impl Into<String>, removed: usize) -> Self {
        Self {
            location_id: Some(location_id.into()),
            prefix: None,
            removed: Some(removed),
        }
    }

    pub fn prefix(prefix: impl Into<String>, removed: usize) -> Self {
        Self {
            location_id: None,
            prefix: Some(prefix.into()),
            removed: Some(removed),
        }
    }

    pub fn cleared() -> Self {
        Self {
            location_id: None,
            prefix: None,
            removed: None,
        }
    }
}

/// Error detail carried inside `ErrorResponse`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub code: String,
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                message: message.into(),
                code: code.into(),
            },
        }
    }
}
