//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    catalog_handler, categories_handler, health_handler, invalidate_handler, locations_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/locations` - Active locations
/// - `GET /api/catalog?location_id=` - Items grouped by category
/// - `GET /api/catalog/categories?location_id=` - Item count per category
/// - `DELETE /api/cache?prefix=` - Invalidate cached entries
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/locations", get(locations_handler))
        .route("/api/catalog", get(catalog_handler))
        .route("/api/catalog/categories", get(categories_handler))
        .route("/api/cache", delete(invalidate_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
