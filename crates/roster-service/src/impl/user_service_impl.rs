//! Cache coordinator for the user collection.
//!
//! Reads go cache first and fall back to the store, writing the fresh
//! collection back under [`ALL_USERS`]. Every mutation writes to
//! the store and then deletes that key before it is acknowledged.
//!
//! Misses and invalidations serialize on one in-process lock: concurrent
//! misses perform a single store read, and an invalidation can never land
//! between a population's store read and its cache write.

use crate::cache::{cache_keys::ALL_USERS, CacheExt, CacheInterface};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::policy::CachePolicy;
use crate::timeout::with_timeout;
use crate::user_service::{Cached, UserService};
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, User, UserChanges, UserId, ValidateExt};
use roster_repository::UserRepository;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Cache-coordinating user service.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
    population_lock: Mutex<()>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            user_repository,
            cache,
            policy,
            population_lock: Mutex::new(()),
        }
    }

    /// Returns the active cache policy.
    #[must_use]
    pub const fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    async fn cache_call<T, F, Fut>(&self, f: F) -> RosterResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RosterResult<T>>,
    {
        with_timeout(self.policy.cache_timeout, f)
            .await
            .map_err(|e| match e {
                RosterError::Timeout(msg) => RosterError::CacheUnavailable(msg),
                other => other,
            })
    }

    async fn store_call<T, F, Fut>(&self, f: F) -> RosterResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RosterResult<T>>,
    {
        with_timeout(self.policy.store_timeout, f).await
    }

    /// Looks up the cached collection. An unreadable payload counts as absent.
    async fn read_cached(&self) -> RosterResult<Option<Vec<UserResponse>>> {
        match self
            .cache_call(|| self.cache.get::<Vec<UserResponse>>(ALL_USERS))
            .await
        {
            Ok(users) => Ok(users),
            Err(e) if e.is_cache_failure() => Err(e),
            Err(e) => {
                warn!(error = %e, key = ALL_USERS, "Discarding unreadable cache entry");
                Ok(None)
            }
        }
    }

    async fn load_from_store(&self) -> RosterResult<Vec<UserResponse>> {
        let users = self
            .store_call(|| self.user_repository.find_all())
            .await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Serves straight from the store when the policy allows it.
    async fn bypass(
        &self,
        cause: RosterError,
        started: Instant,
    ) -> RosterResult<Cached<Vec<UserResponse>>> {
        if !self.policy.fail_open {
            error!(error = %cause, "Cache unavailable, failing read");
            return Err(cause);
        }

        warn!(error = %cause, "Cache unavailable, serving users from store");
        let users = self.load_from_store().await?;
        info!(
            count = users.len(),
            elapsed_ms = %elapsed_ms(started),
            "Serving users from store without caching"
        );
        Ok(Cached::bypass(users))
    }

    /// Deletes the cached collection. Failure is surfaced, never swallowed.
    async fn invalidate(&self) -> RosterResult<()> {
        let _guard = self.population_lock.lock().await;

        match self.cache_call(|| self.cache.delete(ALL_USERS)).await {
            Ok(removed) => {
                debug!(removed, key = ALL_USERS, "Invalidated cached users");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, key = ALL_USERS, "Failed to invalidate cached users");
                Err(if e.is_cache_failure() {
                    e
                } else {
                    RosterError::cache(e.to_string())
                })
            }
        }
    }
}

fn elapsed_ms(started: Instant) -> u128 {
    started.elapsed().as_millis()
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self) -> RosterResult<Cached<Vec<UserResponse>>> {
        let started = Instant::now();

        match self.read_cached().await {
            Ok(Some(users)) => {
                info!(
                    count = users.len(),
                    elapsed_ms = %elapsed_ms(started),
                    "Serving users from cache"
                );
                return Ok(Cached::hit(users));
            }
            Ok(None) => {}
            Err(e) => return self.bypass(e, started).await,
        }

        let _guard = self.population_lock.lock().await;

        // Another request may have populated the entry while we waited.
        match self.read_cached().await {
            Ok(Some(users)) => {
                info!(
                    count = users.len(),
                    elapsed_ms = %elapsed_ms(started),
                    "Serving users from cache"
                );
                return Ok(Cached::hit(users));
            }
            Ok(None) => {}
            Err(e) => return self.bypass(e, started).await,
        }

        let users = self.load_from_store().await?;

        if let Err(e) = self
            .cache_call(|| self.cache.set(ALL_USERS, &users, self.policy.ttl))
            .await
        {
            if !self.policy.fail_open {
                error!(error = %e, "Failed to cache users");
                return Err(e);
            }
            warn!(error = %e, "Failed to cache users, returning store result");
        }

        info!(
            count = users.len(),
            elapsed_ms = %elapsed_ms(started),
            "Serving users from store and caching"
        );
        Ok(Cached::miss(users))
    }

    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;

        let user = User::new(request.name, request.email, request.age);
        let saved = self.store_call(|| self.user_repository.save(&user)).await?;

        self.invalidate().await?;

        info!("User created: {}", saved.id);
        Ok(UserResponse::from(saved))
    }

    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let changes = UserChanges::from(request);
        let updated = self
            .store_call(|| self.user_repository.update(id, &changes))
            .await?
            .ok_or_else(|| RosterError::not_found("User", id))?;

        self.invalidate().await?;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self.store_call(|| self.user_repository.delete(id)).await?;

        self.invalidate().await?;

        if !deleted {
            return Err(RosterError::not_found("User", id));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}
