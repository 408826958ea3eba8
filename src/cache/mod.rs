//! Cache Module
//!
//! Key/value caching with TTL expiration, prefix invalidation and full clear,
//! backed either by an in-process map or by a shared Redis instance.

mod entry;
mod local;
mod shared;


use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};

// Re-export public types
pub use entry::CacheEntry;
pub use local::LocalStore;
pub use shared::SharedStore;

// == Public Constants ==
/// Namespace prepended to every key written to the shared store
pub const DEFAULT_NAMESPACE: &str = "storefront:";

// == Cache Store Trait ==
/// Capability contract shared by every cache backend.
///
/// None of the operations fail: a missing key, an expired entry or a
/// backend fault all look like absence to the caller.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the live value stored under `key`.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key`. `None` (or zero) uses the store's default TTL.
    async fn set(&self, key: &str, value: Value, ttl_seconds: Option<u64>);

    /// Removes `key`, returning whether it existed.
    async fn delete(&self, key: &str) -> bool;

    /// Removes every key starting with `prefix`, returning how many were removed.
    async fn delete_by_prefix(&self, prefix: &str) -> usize;

    /// Removes every entry owned by this store.
    async fn clear(&self);

    /// Purges expired entries, returning how many were removed.
    ///
    /// Backends with native expiry have nothing to sweep.
    async fn cleanup(&self) -> usize {
        0
    }

    /// Short backend identifier used in logs and health output.
    fn backend_name(&self) -> &'static str;
}

// == Cache Handle ==
/// Cloneable handle over the process cache backend with typed accessors.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn CacheStore>,
}

impl Cache {
    /// Wraps an already constructed backend.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// In-process cache with the given default TTL.
    pub fn local(default_ttl: u64) -> Self {
        Self::new(Arc::new(LocalStore::new(default_ttl)))
    }

    /// Selects the backend from configuration.
    ///
    /// A configured `REDIS_URL` selects the shared store, otherwise the
    /// local store is used.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.redis_url.as_deref() {
            Some(url) => {
                let store = SharedStore::new(url, &config.cache_namespace, config.default_ttl)
                    .map_err(|e| AppError::Config(format!("invalid REDIS_URL: {}", e)))?;
                info!("Using Redis cache (namespace '{}')", config.cache_namespace);
                Ok(Self::new(Arc::new(store)))
            }
            None => {
                info!("Using in-memory cache (set REDIS_URL for Redis)");
                Ok(Self::local(config.default_ttl))
            }
        }
    }

    /// Reads `key` and decodes it into `T`.
    ///
    /// A stored value that no longer decodes is reported as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.store.get(key).await?;
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!("Discarding undecodable cache value for '{}': {}", key, e);
                None
            }
        }
    }

    /// Encodes `value` and stores it under `key`.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) {
        match serde_json::to_value(value) {
            Ok(encoded) => self.store.set(key, encoded, ttl_seconds).await,
            Err(e) => warn!("Skipping cache write for '{}': {}", key, e),
        }
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.store.delete(key).await
    }

    pub async fn delete_by_prefix(&self, prefix: &str) -> usize {
        self.store.delete_by_prefix(prefix).await
    }

    pub async fn clear(&self) {
        self.store.clear().await
    }

    pub async fn cleanup(&self) -> usize {
        self.store.cleanup().await
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("backend", &self.backend_name())
            .finish()
    }
}
