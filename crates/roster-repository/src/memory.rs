//! In-memory user store for test suites.

use crate::traits::UserRepository;
use async_trait::async_trait;
use parking_lot::Mutex;
use roster_core::{RosterError, RosterResult, User, UserChanges, UserId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Vector-backed [`UserRepository`].
///
/// Counts full reads so tests can tell cache hits from store reads, and can
/// be switched into an unavailable state to exercise failure paths.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    find_all_calls: AtomicUsize,
    unavailable: AtomicBool,
    latency: Option<Duration>,
}

impl InMemoryUserRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that sleeps for `latency` on every full read.
    #[must_use]
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Number of `find_all` calls served so far.
    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with `StoreUnavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    /// Returns true when the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }

    fn ensure_available(&self) -> RosterResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RosterError::store("in-memory store marked unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> RosterResult<Vec<User>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.ensure_available()?;
        Ok(self.users.lock().clone())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        self.ensure_available()?;
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn save(&self, user: &User) -> RosterResult<User> {
        self.ensure_available()?;
        self.users.lock().push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> RosterResult<Option<User>> {
        self.ensure_available()?;
        let mut users = self.users.lock();
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.apply(changes);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        self.ensure_available()?;
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}
