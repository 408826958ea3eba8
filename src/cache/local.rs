//! Local Store Module
//!
//! In-process cache backend: a HashMap of entries with absolute deadlines.
//! Expired entries are evicted lazily on read and by the periodic sweep.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStore};

// == Local Store ==
/// In-memory cache storage with TTL support.
#[derive(Debug)]
pub struct LocalStore {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: u64,
}

impl LocalStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - Default TTL in seconds for entries without explicit TTL
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    // == Length ==
    /// Returns the current number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn effective_ttl(&self, ttl_seconds: Option<u64>) -> u64 {
        match ttl_seconds {
            Some(ttl) if ttl > 0 => ttl,
            _ => self.default_ttl,
        }
    }
}

#[async_trait]
impl CacheStore for LocalStore {
    // == Get ==
    async fn get(&self, key: &str) -> Option<Value> {
        // Write lock: an expired entry is evicted as part of the read
        let mut entries = self.entries.write().await;

        let expired = entries.get(key)?.is_expired();
        if expired {
            entries.remove(key);
            debug!("Evicted expired key '{}' on read", key);
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    async fn set(&self, key: &str, value: Value, ttl_seconds: Option<u64>) {
        let entry = CacheEntry::new(value, self.effective_ttl(ttl_seconds));
        self.entries.write().await.insert(key.to_string(), entry);
    }

    // == Delete ==
    async fn delete(&self, key: &str) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    // == Delete By Prefix ==
    async fn delete_by_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        before - entries.len()
    }

    // == Clear ==
    async fn clear(&self) {
        self.entries.write().await.clear();
    }

    // == Cleanup Expired ==
    async fn cleanup(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        before - entries.len()
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_store_new() {
        let store = LocalStore::new(300);
        assert_eq!(store.len().await, 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = LocalStore::new(300);

        store.set("key1", json!({"a": 1}), None).await;

        assert_eq!(store.get("key1").await, Some(json!({"a": 1})));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_nonexistent() {
        let store = LocalStore::new(300);
        assert!(store.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn test_store_delete() {
        let store = LocalStore::new(300);

        store.set("key1", json!("value1"), None).await;

        assert!(store.delete("key1").await);
        assert!(store.is_empty().await);
        assert!(store.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_store_delete_nonexistent() {
        let store = LocalStore::new(300);
        assert!(!store.delete("nonexistent").await);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = LocalStore::new(300);

        store.set("key1", json!("value1"), Some(60)).await;
        store.set("key1", json!("value2"), Some(1)).await;

        assert_eq!(store.get("key1").await, Some(json!("value2")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_ttl_expiration_evicts_on_read() {
        let store = LocalStore::new(300);

        store.set("key1", json!("value1"), Some(1)).await;
        assert!(store.get("key1").await.is_some());

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert!(store.get("key1").await.is_none());
        assert_eq!(store.len().await, 0, "Expired entry should be evicted by the read");
    }

    #[tokio::test]
    async fn test_store_zero_ttl_uses_default() {
        let store = LocalStore::new(300);

        store.set("key1", json!("value1"), Some(0)).await;

        let entries = store.entries.read().await;
        let entry = entries.get("key1").unwrap();
        assert_eq!(entry.expires_at - entry.created_at, 300_000);
    }

    #[tokio::test]
    async fn test_store_delete_by_prefix() {
        let store = LocalStore::new(300);

        store.set("catalog:loc_1", json!(1), None).await;
        store.set("catalog:loc_2", json!(2), None).await;
        store.set("categories:loc_1", json!(3), None).await;
        store.set("locations", json!(4), None).await;

        assert_eq!(store.delete_by_prefix("catalog:").await, 2);
        assert!(store.get("catalog:loc_1").await.is_none());
        assert!(store.get("catalog:loc_2").await.is_none());
        assert!(store.get("categories:loc_1").await.is_some());
        assert!(store.get("locations").await.is_some());
        assert_eq!(store.delete_by_prefix("catalog:").await, 0);
    }

    #[tokio::test]
    async fn test_store_clear() {
        let store = LocalStore::new(300);

        store.set("key1", json!(1), None).await;
        store.set("key2", json!(2), None).await;
        store.clear().await;

        assert!(store.is_empty().await);
        assert!(store.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_store_cleanup_expired() {
        let store = LocalStore::new(300);

        store.set("key1", json!("value1"), Some(1)).await;
        store.set("key2", json!("value2"), Some(10)).await;

        tokio::time::sleep(Duration::from_millis(1100)).await;

        assert_eq!(store.cleanup().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("key2").await.is_some());
    }
}
