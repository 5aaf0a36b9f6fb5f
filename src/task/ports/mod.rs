//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services
//! and storage adapters.

pub mod key_value;
pub mod repository;

pub use key_value::{KeyValueError, KeyValueResult, KeyValueStore};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
