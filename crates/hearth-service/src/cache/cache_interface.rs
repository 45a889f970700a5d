//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain
/// dyn-compatibility.
///
/// All operations are infallible by contract: implementations must
/// absorb backend errors (logging them) so callers never have to handle
/// cache failures. A failed read is a miss, a failed write is a no-op.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Gets a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, has expired, or the
    /// backend is unreachable.
    async fn get_raw(&self, key: &str) -> Option<String>;

    /// Sets a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration);

    /// Deletes the given keys from the cache.
    ///
    /// An empty key list is a no-op that never touches the backend.
    /// Returns the number of keys actually removed.
    async fn delete(&self, keys: &[String]) -> u64;

    /// Deletes all keys matching a glob-style pattern.
    ///
    /// Returns the number of keys removed. On a partial failure the
    /// count covers the keys removed before the error.
    async fn clear_by_pattern(&self, pattern: &str) -> u64;

    /// Checks if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Gets a typed value from the cache.
    ///
    /// A value that fails to deserialize is treated as a miss.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let json = self.get_raw(key).await?;
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Discarding unreadable cache entry '{}': {}", key, e);
                None
            }
        }
    }

    /// Sets a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        match serde_json::to_string(value) {
            Ok(json) => self.set_raw(key, &json, ttl).await,
            Err(e) => warn!("Failed to serialize value for cache key '{}': {}", key, e),
        }
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
