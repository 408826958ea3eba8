//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::{
    CategorySummary, GroupedCatalog, HealthResponse, InvalidateQuery, InvalidateResponse, Location,
    LocationQuery,
};
use crate::services::{CatalogService, LocationService};
use crate::upstream::{CatalogSource, SquareClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process cache, also used directly by the maintenance route
    pub cache: Cache,
    pub catalog: CatalogService,
    pub locations: LocationService,
}

impl AppState {
    /// Wires both pipelines to the same cache and upstream source.
    pub fn new(cache: Cache, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog: CatalogService::new(cache.clone(), Arc::clone(&source)),
            locations: LocationService::new(cache.clone(), source),
            cache,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Selects the cache backend and builds the Square client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = Cache::from_config(config)?;
        let source = Arc::new(SquareClient::from_config(config));
        Ok(Self::new(cache, source))
    }
}

/// Handler for GET /api/locations
pub async fn locations_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<Vec<Location>>, ApiError> {
    let locations = state.locations.active_locations().await.map_err(|e| {
        ApiError::fetch_failed("Failed to fetch locations", "LOCATION_FETCH_FAILED", e)
    })?;

    Ok(Json(locations))
}

/// Handler for GET /api/catalog?location_id=...
pub async fn catalog_handler(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> std::result::Result<Json<GroupedCatalog>, ApiError> {
    let location_id = query.location_id().ok_or(ApiError::MissingLocationId)?;

    let catalog = state
        .catalog
        .grouped_catalog(location_id)
        .await
        .map_err(|e| ApiError::fetch_failed("Failed to fetch catalog", "CATALOG_FETCH_FAILED", e))?;

    Ok(Json(catalog))
}

/// Handler for GET /api/catalog/categories?location_id=...
///
/// A location without any categorized item answers 404.
pub async fn categories_handler(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> std::result::Result<Json<Vec<CategorySummary>>, ApiError> {
    let location_id = query.location_id().ok_or(ApiError::MissingLocationId)?;

    let categories = state
        .catalog
        .category_summary(location_id)
        .await
        .map_err(|e| {
            ApiError::fetch_failed("Failed to fetch categories", "CATEGORIES_FETCH_FAILED", e)
        })?;

    if categories.is_empty() {
        return Err(ApiError::CategoriesNotFound);
    }

    Ok(Json(categories))
}

/// Handler for DELETE /api/cache?location_id=...|prefix=...
///
/// A location id drops both catalog views of that location; a prefix drops
/// every key under it. Without either the whole cache is cleared.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Query(query): Query<InvalidateQuery>,
) -> Json<InvalidateResponse> {
    let location_id = query.location_id.filter(|id| !id.trim().is_empty());
    if let Some(location_id) = location_id {
        let removed = state.catalog.invalidate_location(&location_id).await;
        return Json(InvalidateResponse::location(location_id, removed));
    }

    match query.prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => {
            let removed = state.cache.delete_by_prefix(&prefix).await;
            tracing::info!("Invalidated {} cache entries under '{}'", removed, prefix);
            Json(InvalidateResponse::prefix(prefix, removed))
        }
        None => {
            state.cache.clear().await;
            tracing::info!("Cache cleared");
            Json(InvalidateResponse::cleared())
        }
    }
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.backend_name()))
}
