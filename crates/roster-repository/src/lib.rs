//! # Roster Repository
//!
//! Durable user store.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! MySqlUserRepository   (SQLx)
//!   ↓  Arc<DatabasePool>
//! MySQL
//! ```
//!
//! With the `testing` feature, [`InMemoryUserRepository`] offers the same
//! interface over a process-local vector for test suites.

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryUserRepository;
