//! In-process cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use roster_core::RosterResult;
use std::time::{Duration, Instant};
use tracing::debug;

/// Entry lifetimes are clamped to this.
pub const MAX_ENTRY_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Process-local cache backed by `moka`, with a TTL per entry.
#[derive(Clone)]
pub struct MemoryCacheService {
    entries: Cache<String, Entry>,
}

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

impl MemoryCacheService {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates an empty cache holding at most `max_capacity` entries.
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Returns true if `key` holds a live entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for MemoryCacheService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let value = self.entries.get(key).await.map(|entry| entry.value);

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        let ttl = ttl.min(MAX_ENTRY_TTL);
        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        debug!("Cached key '{}' with TTL {:?}", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        let removed = self.entries.contains_key(key);
        self.entries.invalidate(key).await;
        debug!("Deleted key '{}': {}", key, removed);
        Ok(removed)
    }

    async fn ping(&self) -> RosterResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCacheService")
            .field("entry_count", &self.entries.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    #[tokio::test]
    async fn test_set_then_get() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("k", "[1,2]", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("[1,2]"));
        assert!(cache.contains("k"));
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("k", "v", Duration::from_millis(50))
            .await
            .unwrap();
        assert!(cache.get_raw("k").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(cache.get_raw("k").await.unwrap().is_none());
        assert!(!cache.contains("k"));
    }

    #[tokio::test]
    async fn test_overwrite_takes_the_new_ttl() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("k", "old", Duration::from_millis(50))
            .await
            .unwrap();
        cache
            .set_raw("k", "new", Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn test_huge_ttl_is_clamped() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("k", "v", Duration::from_secs(u64::MAX))
            .await
            .unwrap();
        assert_eq!(cache.get_raw("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let cache = MemoryCacheService::new();
        assert!(!cache.delete("k").await.unwrap());

        cache.set_raw("k", "v", Duration::from_secs(60)).await.unwrap();
        assert!(cache.delete("k").await.unwrap());
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_typed_access() {
        let cache = MemoryCacheService::new();
        cache
            .set("nums", &vec![1u32, 2, 3], Duration::from_secs(5))
            .await
            .unwrap();
        let nums: Option<Vec<u32>> = cache.get("nums").await.unwrap();
        assert_eq!(nums, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_typed_get_of_garbage_is_not_a_cache_failure() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("nums", "{not json", Duration::from_secs(5))
            .await
            .unwrap();
        let err = cache.get::<Vec<u32>>("nums").await.unwrap_err();
        assert!(!err.is_cache_failure());
    }
}
