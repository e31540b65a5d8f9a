//! Application wiring and the serve loop.

use crate::startup::print_startup_info;
use roster_config::{validate_config, AppConfig, RedisConfig};
use roster_core::{RosterError, RosterResult};
use roster_repository::{create_pool, MySqlUserRepository, UserRepository};
use roster_rest::{create_router, AppState};
use roster_service::{
    CacheHealthCheck, CacheInterface, CachePolicy, MemoryCacheService, RedisCacheService,
    UserService, UserServiceImpl,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

/// Picks the cache backend: Redis when enabled, otherwise in-process.
pub fn build_cache(config: &RedisConfig) -> RosterResult<Arc<dyn CacheInterface>> {
    if config.enabled {
        info!("Using Redis cache");
        Ok(Arc::new(RedisCacheService::from_config(config)?))
    } else {
        warn!("Redis disabled, using in-process cache");
        Ok(Arc::new(MemoryCacheService::new()))
    }
}

/// Builds the user service over the given store and cache.
pub fn build_user_service(
    config: &AppConfig,
    repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
) -> Arc<dyn UserService> {
    let policy = CachePolicy::from_config(&config.cache, &config.database);
    info!(
        ttl_secs = policy.ttl.as_secs(),
        fail_open = policy.fail_open,
        "Cache policy"
    );
    Arc::new(UserServiceImpl::new(repository, cache, policy))
}

/// Connects dependencies and serves HTTP until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> RosterResult<()> {
    validate_config(&config)?;

    let db_pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache = build_cache(&config.redis)?;
    let repository: Arc<dyn UserRepository> = Arc::new(MySqlUserRepository::new(db_pool.clone()));
    let user_service = build_user_service(&config, repository, cache.clone());

    let state = AppState::new(user_service)
        .with_health_check(db_pool.clone())
        .with_health_check(Arc::new(CacheHealthCheck::new(cache.clone())));

    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RosterError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&addr, cache.backend());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RosterError::Internal(format!("HTTP server error: {e}")))?;

    db_pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_service::CreateUserRequest;

    #[tokio::test]
    async fn test_build_cache_without_redis_is_in_process() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = build_cache(&config).unwrap();
        assert_eq!(cache.backend(), "memory");
    }

    #[tokio::test]
    async fn test_build_cache_with_redis_is_lazy() {
        let config = RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            ..RedisConfig::default()
        };
        let cache = build_cache(&config).unwrap();
        assert_eq!(cache.backend(), "redis");
    }

    #[tokio::test]
    async fn test_build_user_service_uses_configured_policy() {
        let repository = Arc::new(roster_repository::InMemoryUserRepository::new());
        let cache: Arc<dyn CacheInterface> = Arc::new(MemoryCacheService::new());
        let service = build_user_service(&AppConfig::default(), repository.clone(), cache);

        service
            .create_user(CreateUserRequest {
                name: "Ann".to_string(),
                email: "ann@example.com".to_string(),
                age: 30,
            })
            .await
            .unwrap();

        assert_eq!(service.list_users().await.unwrap().value.len(), 1);
        assert_eq!(repository.find_all_calls(), 1);
    }
}
