//! Repository port for task persistence.

use crate::task::domain::{Task, TaskId, TaskUpdate};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Ordered task persistence contract.
///
/// Implementations guarantee structural integrity of what they persist but
/// apply no business rules.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Appends a task to the end of the collection and returns it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Write`] when the store rejects the
    /// write; the stored collection is unchanged in that case.
    async fn add(&self, task: Task) -> TaskRepositoryResult<Task>;

    /// Overwrites the fields present in `update` on the task with `id` and
    /// returns the merged task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`, or
    /// [`TaskRepositoryError::Write`] when the store rejects the write.
    async fn update(&self, id: &TaskId, update: &TaskUpdate) -> TaskRepositoryResult<Task>;

    /// Removes the task with `id`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`; the
    /// stored collection is untouched in that case.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;

    /// Removes every task whose id is listed, in a single write.
    ///
    /// Unknown ids are ignored. Returns the number of tasks removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Write`] when the store rejects the
    /// write.
    async fn delete_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize>;

    /// Returns every valid stored task in insertion order.
    ///
    /// Missing or corrupt data yields an empty collection; individually
    /// malformed records are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Read`] only when the store denies
    /// access.
    async fn get_all(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// No task has the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The store denied read access.
    #[error("could not read tasks: {0}")]
    Read(Arc<dyn std::error::Error + Send + Sync>),

    /// The store rejected a write.
    #[error("could not save tasks: {0}")]
    Write(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a read failure.
    pub fn read(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Read(Arc::new(err))
    }

    /// Wraps a write failure.
    pub fn write(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Write(Arc::new(err))
    }
}
