//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{RosterResult, UserId};
use std::fmt;

/// Where a read was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the cached collection.
    Hit,
    /// Read from the store and written back to the cache.
    Miss,
    /// Read from the store because the cache could not be used.
    Bypass,
}

impl CacheStatus {
    /// Value for the `X-Cache` response header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value tagged with how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cached<T> {
    pub value: T,
    pub status: CacheStatus,
}

impl<T> Cached<T> {
    #[must_use]
    pub const fn hit(value: T) -> Self {
        Self {
            value,
            status: CacheStatus::Hit,
        }
    }

    #[must_use]
    pub const fn miss(value: T) -> Self {
        Self {
            value,
            status: CacheStatus::Miss,
        }
    }

    #[must_use]
    pub const fn bypass(value: T) -> Self {
        Self {
            value,
            status: CacheStatus::Bypass,
        }
    }
}

/// User service trait.
///
/// Every successful mutation leaves the cached user list absent before it
/// returns.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists every user, from the cache when possible.
    async fn list_users(&self) -> RosterResult<Cached<Vec<UserResponse>>>;

    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Applies a partial update to a user.
    async fn update_user(&self, id: UserId, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;
}
