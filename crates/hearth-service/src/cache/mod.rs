//! Look-aside caching for property reads.
//!
//! The cache is strictly an accelerator: every operation absorbs
//! backend failures so a broken or disabled Redis never breaks a
//! request. Reads degrade to misses and writes become no-ops.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::RedisCacheService;
