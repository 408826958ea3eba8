//! Services Module
//!
//! Read-through pipelines over the cache and the upstream source.
//!
//! # Services
//! - `CatalogService` - grouped catalog and category summary per location
//! - `LocationService` - active locations

pub mod aggregate;
mod catalog;
mod locations;

use std::future::Future;

use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

use crate::cache::Cache;
use crate::error::{AppError, Result};

pub use catalog::CatalogService;
pub use locations::LocationService;

// == Cache Keys & TTLs ==
/// Key of the location list
pub const LOCATIONS_KEY: &str = "locations";
/// Key prefix of grouped catalogs, followed by the location id
pub const CATALOG_KEY_PREFIX: &str = "catalog:";
/// Key prefix of category summaries, followed by the location id
pub const CATEGORIES_KEY_PREFIX: &str = "categories:";

/// Locations rarely change
pub const LOCATIONS_TTL: u64 = 600;
pub const CATALOG_TTL: u64 = 300;
pub const CATEGORIES_TTL: u64 = 300;

/// Returns the cached value under `key`, or runs `load` and caches its result.
///
/// The load and the cache write run on a spawned task: if the caller goes
/// away mid-fetch, the result still lands in the cache. Concurrent misses
/// are not coalesced; the last write wins.
pub(crate) async fn read_through<T, F, Fut>(cache: &Cache, key: String, ttl: u64, load: F) -> Result<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    if let Some(cached) = cache.get::<T>(&key).await {
        info!("[Cache] HIT: {}", key);
        return Ok(cached);
    }
    info!("[Cache] MISS: {}", key);

    let cache = cache.clone();
    let pending = load();
    tokio::spawn(async move {
        let value = pending.await?;
        cache.set(&key, &value, Some(ttl)).await;
        Ok::<T, AppError>(value)
    })
    .await
    .map_err(|e| AppError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_read_through_loads_once_then_hits() {
        let cache = Cache::local(300);
        let loads = Arc::new(AtomicUsize::new(0));

        for _ in 0..2 {
            let loads = Arc::clone(&loads);
            let value: Vec<String> = read_through(&cache, "locations".to_string(), 600, move || async move {
                loads.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["loc_1".to_string()])
            })
            .await
            .unwrap();
            assert_eq!(value, vec!["loc_1".to_string()]);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(
            cache.get::<Vec<String>>("locations").await,
            Some(vec!["loc_1".to_string()])
        );
    }

    #[tokio::test]
    async fn test_read_through_does_not_cache_failures() {
        let cache = Cache::local(300);

        let result: Result<Vec<String>> = read_through(&cache, "locations".to_string(), 600, || async {
            Err(AppError::Task("boom".to_string()))
        })
        .await;

        assert!(matches!(result, Err(AppError::Task(_))));
        assert!(cache.get::<Vec<String>>("locations").await.is_none());
    }
}
