//! Location Service
//!
//! Read-through list of active locations.

use std::sync::Arc;

use crate::cache::Cache;
use crate::error::Result;
use crate::models::Location;
use crate::services::aggregate;
use crate::services::{read_through, LOCATIONS_KEY, LOCATIONS_TTL};
use crate::upstream::CatalogSource;

#[derive(Clone)]
pub struct LocationService {
    cache: Cache,
    source: Arc<dyn CatalogSource>,
}

impl LocationService {
    pub fn new(cache: Cache, source: Arc<dyn CatalogSource>) -> Self {
        Self { cache, source }
    }

    /// Locations with status `ACTIVE`, cached for ten minutes.
    pub async fn active_locations(&self) -> Result<Vec<Location>> {
        let source = Arc::clone(&self.source);
        read_through(&self.cache, LOCATIONS_KEY.to_string(), LOCATIONS_TTL, move || {
            load_active(source)
        })
        .await
    }
}

async fn load_active(source: Arc<dyn CatalogSource>) -> Result<Vec<Location>> {
    Ok(aggregate::active_locations(source.list_locations().await?))
}
