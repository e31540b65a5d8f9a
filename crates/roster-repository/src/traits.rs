//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{RosterResult, User, UserChanges, UserId};

/// User store.
///
/// Failures to reach the backing store surface as
/// [`RosterError::StoreUnavailable`](roster_core::RosterError::StoreUnavailable).
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns every user, oldest first.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> RosterResult<User>;

    /// Applies the given changes. Returns `None` when no user has that id.
    async fn update(&self, id: UserId, changes: &UserChanges) -> RosterResult<Option<User>>;

    /// Deletes a user by ID. Returns whether a record was removed.
    async fn delete(&self, id: UserId) -> RosterResult<bool>;
}
