//! Taskkeep: a personal task list persisted in a flat key-value store.
//!
//! This crate provides the task lifecycle and persistence contract behind a
//! single-user to-do list: validation of task text, toggling, filtering and
//! statistics, and a fault-tolerant storage adapter that keeps the whole
//! collection as one JSON value under one key.
//!
//! # Architecture
//!
//! Taskkeep follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (memory, filesystem)
//!
//! # Modules
//!
//! - [`task`]: Task entity, storage adapter and task service
//!
//! # Concurrency
//!
//! Every mutation is a read-modify-write of the whole collection. The
//! storage adapter serialises those cycles inside one process, but nothing
//! coordinates two processes writing the same store: run a single writer.

pub mod task;
