//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Keys fetched per SCAN iteration during pattern invalidation.
const SCAN_BATCH_SIZE: u32 = 100;

/// Redis-based cache service.
///
/// Constructed with [`disabled`](Self::disabled) it becomes a no-op
/// that never touches the network, which is how the service runs when
/// Redis is turned off in configuration.
pub struct RedisCacheService {
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Creates a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Creates a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Gets a connection from the pool, logging failures.
    async fn get_conn(&self) -> Option<deadpool_redis::Connection> {
        let pool = self.pool.as_ref()?;
        match pool.get().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                warn!("Failed to get Redis connection: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> Option<String> {
        let mut conn = self.get_conn().await?;

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                Some(value)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                None
            }
            Err(e) => {
                warn!("Failed to get cache key '{}': {}", key, e);
                None
            }
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) {
        let Some(mut conn) = self.get_conn().await else {
            return;
        };

        let ttl_secs = ttl.as_secs().max(1);
        match conn.set_ex::<_, _, ()>(key, value, ttl_secs).await {
            Ok(()) => debug!("Cached key '{}' with TTL {}s", key, ttl_secs),
            Err(e) => warn!("Failed to set cache key '{}': {}", key, e),
        }
    }

    async fn delete(&self, keys: &[String]) -> u64 {
        if keys.is_empty() {
            return 0;
        }

        let Some(mut conn) = self.get_conn().await else {
            return 0;
        };

        match conn.del::<_, i64>(keys).await {
            Ok(deleted) => {
                debug!("Deleted {} of {} cache keys", deleted, keys.len());
                deleted as u64
            }
            Err(e) => {
                warn!("Failed to delete cache keys: {}", e);
                0
            }
        }
    }

    async fn clear_by_pattern(&self, pattern: &str) -> u64 {
        let Some(mut conn) = self.get_conn().await else {
            return 0;
        };

        // Cursor-based SCAN so large keyspaces never block the server
        // the way KEYS would.
        let mut cursor: u64 = 0;
        let mut deleted: u64 = 0;

        loop {
            let reply: Result<(u64, Vec<String>), _> = deadpool_redis::redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH_SIZE)
                .query_async(&mut conn)
                .await;

            let (next_cursor, keys) = match reply {
                Ok(reply) => reply,
                Err(e) => {
                    warn!("SCAN failed for pattern '{}': {}", pattern, e);
                    return deleted;
                }
            };

            if !keys.is_empty() {
                match conn.del::<_, i64>(&keys).await {
                    Ok(n) => deleted += n as u64,
                    Err(e) => {
                        warn!("Failed to delete keys matching '{}': {}", pattern, e);
                        return deleted;
                    }
                }
            }

            if next_cursor == 0 {
                break;
            }
            cursor = next_cursor;
        }

        debug!("Cleared {} keys matching pattern '{}'", deleted, pattern);
        deleted
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_is_noop() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());

        assert_eq!(cache.get_raw("any").await, None);
        cache.set_raw("any", "value", Duration::from_secs(60)).await;
        assert_eq!(cache.get_raw("any").await, None);
        assert_eq!(cache.delete(&["any".to_string()]).await, 0);
        assert_eq!(cache.clear_by_pattern("any:*").await, 0);
    }

    #[tokio::test]
    async fn test_empty_delete_is_noop() {
        let cache = RedisCacheService::disabled();
        assert_eq!(cache.delete(&[]).await, 0);
    }

    // The pool connects lazily, so it builds fine against a port with
    // no listener; every operation must then degrade to a miss instead
    // of surfacing the connection error.
    #[tokio::test]
    async fn test_unreachable_redis_degrades_to_miss() {
        let pool = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
            .builder()
            .unwrap()
            .max_size(1)
            .runtime(deadpool_redis::Runtime::Tokio1)
            .build()
            .unwrap();
        let cache = RedisCacheService::new(Arc::new(pool));
        assert!(cache.is_enabled());

        assert_eq!(cache.get_raw("property:missing").await, None);
        cache
            .set_raw("property:missing", "{}", Duration::from_secs(60))
            .await;
        assert_eq!(cache.delete(&["property:missing".to_string()]).await, 0);
        assert_eq!(cache.clear_by_pattern("properties_list:*").await, 0);
    }
}
