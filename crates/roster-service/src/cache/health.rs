//! Readiness probe for the cache backend.

use super::CacheInterface;
use async_trait::async_trait;
use roster_core::{HealthCheck, HealthStatus};
use std::sync::Arc;

/// Reports the cache as ready when it answers a ping.
pub struct CacheHealthCheck {
    cache: Arc<dyn CacheInterface>,
}

impl CacheHealthCheck {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl HealthCheck for CacheHealthCheck {
    fn name(&self) -> &str {
        self.cache.backend()
    }

    async fn check(&self) -> HealthStatus {
        match self.cache.ping().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}
