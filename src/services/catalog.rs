//! Catalog Service
//!
//! Read-through grouped catalog and category summary per location.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::Cache;
use crate::error::Result;
use crate::models::{CategorySummary, GroupedCatalog};
use crate::services::aggregate::{self, CatalogIndex};
use crate::services::{
    read_through, CATALOG_KEY_PREFIX, CATALOG_TTL, CATEGORIES_KEY_PREFIX, CATEGORIES_TTL,
};
use crate::upstream::CatalogSource;

#[derive(Clone)]
pub struct CatalogService {
    cache: Cache,
    source: Arc<dyn CatalogSource>,
}

impl CatalogService {
    pub fn new(cache: Cache, source: Arc<dyn CatalogSource>) -> Self {
        Self { cache, source }
    }

    /// Items available at `location_id`, grouped by category name.
    ///
    /// Cached under `catalog:<location_id>` for five minutes.
    pub async fn grouped_catalog(&self, location_id: &str) -> Result<GroupedCatalog> {
        let source = Arc::clone(&self.source);
        let location_id = location_id.to_string();
        let key = catalog_key(&location_id);

        read_through(&self.cache, key, CATALOG_TTL, move || {
            load_grouped(source, location_id)
        })
        .await
    }

    /// Number of items per category at `location_id`.
    ///
    /// Cached under `categories:<location_id>` for five minutes.
    pub async fn category_summary(&self, location_id: &str) -> Result<Vec<CategorySummary>> {
        let source = Arc::clone(&self.source);
        let location_id = location_id.to_string();
        let key = categories_key(&location_id);

        read_through(&self.cache, key, CATEGORIES_TTL, move || {
            load_summary(source, location_id)
        })
        .await
    }

    /// Drops both cached views of one location, returning how many existed.
    pub async fn invalidate_location(&self, location_id: &str) -> usize {
        let keys = [catalog_key(location_id), categories_key(location_id)];
        let mut count = 0;
        for key in &keys {
            if self.cache.delete(key).await {
                count += 1;
            }
        }
        info!("Invalidated {} cached views of location {}", count, location_id);
        count
    }
}

async fn load_grouped(
    source: Arc<dyn CatalogSource>,
    location_id: String,
) -> Result<GroupedCatalog> {
    let index = CatalogIndex::build(source.fetch_catalog().await?);
    let grouped = aggregate::group_by_category(&index, &location_id);
    debug!(
        "Grouped catalog for {}: [{}]",
        location_id,
        grouped.categories().collect::<Vec<_>>().join(", ")
    );
    Ok(grouped)
}

async fn load_summary(
    source: Arc<dyn CatalogSource>,
    location_id: String,
) -> Result<Vec<CategorySummary>> {
    let index = CatalogIndex::build(source.fetch_catalog().await?);
    Ok(aggregate::summarize_categories(&index, &location_id))
}

fn catalog_key(location_id: &str) -> String {
    format!("{}{}", CATALOG_KEY_PREFIX, location_id)
}

fn categories_key(location_id: &str) -> String {
    format!("{}{}", CATEGORIES_KEY_PREFIX, location_id)
}
