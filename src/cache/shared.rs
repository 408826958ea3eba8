//! Shared Store Module
//!
//! Redis-backed cache for multi-instance deployments. Expiry is delegated to
//! Redis (`SETEX`), and every key lives under a fixed namespace.
//!
//! Transport and decode failures are logged and reported as a miss or no-op,
//! never as an error.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, Client, RedisResult};
use serde_json::Value;
use tracing::{error, warn};

use crate::cache::CacheStore;

// == Shared Store ==
/// Redis cache backend.
#[derive(Clone)]
pub struct SharedStore {
    client: Client,
    namespace: String,
    default_ttl: u64,
}

impl SharedStore {
    /// Creates a store for the given connection URL.
    ///
    /// The connection itself is opened lazily, so an unreachable server only
    /// shows up as logged misses.
    pub fn new(url: &str, namespace: &str, default_ttl: u64) -> RedisResult<Self> {
        Ok(Self {
            client: Client::open(url)?,
            namespace: namespace.to_string(),
            default_ttl,
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.namespace, key)
    }

    /// `KEYS` pattern matching every namespaced key that starts with `prefix`.
    fn prefix_pattern(&self, prefix: &str) -> String {
        format!(
            "{}{}*",
            escape_glob(&self.namespace),
            escape_glob(prefix)
        )
    }

    async fn connection(&self) -> RedisResult<MultiplexedConnection> {
        self.client.get_multiplexed_async_connection().await
    }

    async fn try_get(&self, key: &str) -> RedisResult<Option<String>> {
        let mut conn = self.connection().await?;
        redis::cmd("GET")
            .arg(self.namespaced(key))
            .query_async::<Option<String>>(&mut conn)
            .await
    }

    async fn try_set(&self, key: &str, payload: String, ttl: u64) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        redis::cmd("SETEX")
            .arg(self.namespaced(key))
            .arg(ttl)
            .arg(payload)
            .query_async::<()>(&mut conn)
            .await
    }

    async fn try_delete(&self, key: &str) -> RedisResult<usize> {
        let mut conn = self.connection().await?;
        redis::cmd("DEL")
            .arg(self.namespaced(key))
            .query_async::<usize>(&mut conn)
            .await
    }

    async fn try_delete_matching(&self, pattern: &str) -> RedisResult<usize> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(pattern)
            .query_async::<Vec<String>>(&mut conn)
            .await?;
        if keys.is_empty() {
            return Ok(0);
        }
        redis::cmd("DEL")
            .arg(&keys)
            .query_async::<usize>(&mut conn)
            .await
    }
}

#[async_trait]
impl CacheStore for SharedStore {
    async fn get(&self, key: &str) -> Option<Value> {
        let payload = match self.try_get(key).await {
            Ok(payload) => payload?,
            Err(e) => {
                error!("[Redis] Error getting key '{}': {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("[Redis] Malformed payload under '{}': {}", key, e);
                None
            }
        }
    }

    async fn set(&self, key: &str, value: Value, ttl_seconds: Option<u64>) {
        let ttl = match ttl_seconds {
            Some(ttl) if ttl > 0 => ttl,
            _ => self.default_ttl,
        };
        let payload = value.to_string();

        if let Err(e) = self.try_set(key, payload, ttl).await {
            error!("[Redis] Error setting key '{}': {}", key, e);
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match self.try_delete(key).await {
            Ok(removed) => removed > 0,
            Err(e) => {
                error!("[Redis] Error deleting key '{}': {}", key, e);
                false
            }
        }
    }

    async fn delete_by_prefix(&self, prefix: &str) -> usize {
        match self.try_delete_matching(&self.prefix_pattern(prefix)).await {
            Ok(removed) => removed,
            Err(e) => {
                error!("[Redis] Error deleting by prefix '{}': {}", prefix, e);
                0
            }
        }
    }

    async fn clear(&self) {
        if let Err(e) = self.try_delete_matching(&self.prefix_pattern("")).await {
            error!("[Redis] Error clearing cache: {}", e);
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedStore")
            .field("namespace", &self.namespace)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// Escapes Redis glob metacharacters so a prefix matches literally.
fn escape_glob(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
