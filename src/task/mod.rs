//! Task lifecycle and persistence.
//!
//! Tasks are created, edited, toggled, filtered and deleted through
//! [`services::TaskService`], which validates input before handing the
//! collection to a [`ports::TaskRepository`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
