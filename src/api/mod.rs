//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /api/locations` - Active locations
//! - `GET /api/catalog` - Catalog grouped by category for a location
//! - `GET /api/catalog/categories` - Category summary for a location
//! - `DELETE /api/cache` - Cache invalidation
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
