//! Cache policy for the user collection.

use roster_config::{CacheConfig, DatabaseConfig};
use std::time::Duration;

/// How the coordinator uses the cache and how long it waits on its
/// dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of the cached collection.
    pub ttl: Duration,
    /// Serve reads from the store when the cache is unreachable.
    pub fail_open: bool,
    /// Upper bound on one cache call.
    pub cache_timeout: Duration,
    /// Upper bound on one store call.
    pub store_timeout: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default(), &DatabaseConfig::default())
    }
}

impl CachePolicy {
    /// Builds the policy from the `cache` and `database` config sections.
    #[must_use]
    pub fn from_config(cache: &CacheConfig, database: &DatabaseConfig) -> Self {
        Self {
            ttl: cache.ttl(),
            fail_open: cache.fail_open,
            cache_timeout: cache.operation_timeout(),
            store_timeout: database.query_timeout(),
        }
    }

    /// Same policy with reads failing when the cache is down.
    #[must_use]
    pub const fn fail_closed(mut self) -> Self {
        self.fail_open = false;
        self
    }
}
