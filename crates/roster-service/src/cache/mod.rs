//! Caching infrastructure for the service layer.
//!
//! A small key/value abstraction with a Redis implementation for
//! deployments and an in-process implementation for single-node runs and
//! tests.

mod cache_interface;
pub mod cache_keys;
mod health;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use health::CacheHealthCheck;
pub use memory_cache::MemoryCacheService;
pub use redis_cache::RedisCacheService;
