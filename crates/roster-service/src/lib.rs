//! # Roster Service
//!
//! Service layer for Roster: the cache capability, request/response DTOs
//! and the coordinator that keeps the cached user list consistent with the
//! store.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod policy;
pub mod timeout;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use policy::CachePolicy;
pub use r#impl::UserServiceImpl;
pub use timeout::with_timeout;
pub use user_service::*;
