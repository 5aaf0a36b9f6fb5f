//! Service layer enforcing task business rules over a repository.

use crate::task::{
    domain::{Task, TaskDomainError, TaskFilter, TaskId, TaskRules, TaskStats, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input validation failed before storage was touched.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskServiceError {
    /// Returns `true` when the referenced task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(TaskRepositoryError::NotFound(_)))
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Business-rule entry point for the task list.
///
/// The service keeps no copy of the collection between calls; every
/// operation goes back to the repository.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    rules: TaskRules,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service with the default [`TaskRules`].
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            rules: TaskRules {
                max_text_length: TaskRules::DEFAULT_MAX_TEXT_LENGTH,
            },
        }
    }

    /// Replaces the text validation rules.
    #[must_use]
    pub const fn with_rules(mut self, rules: TaskRules) -> Self {
        self.rules = rules;
        self
    }

    /// Returns the active text validation rules.
    #[must_use]
    pub const fn rules(&self) -> &TaskRules {
        &self.rules
    }

    /// Creates a task from raw user input and appends it to the list.
    ///
    /// The text is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when the text is empty after
    /// trimming or too long, or [`TaskServiceError::Repository`] when the
    /// store rejects the write.
    pub async fn add_task(&self, text: &str) -> TaskServiceResult<Task> {
        let validated = self.rules.validate_text(text)?;
        let task = Task::new(validated, &*self.clock);
        let stored = self.repository.add(task).await?;
        debug!(task_id = %stored.id(), "task added");
        Ok(stored)
    }

    /// Applies a partial update to an existing task.
    ///
    /// Replacement text goes through the same rules as [`Self::add_task`]
    /// and is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] when replacement text is
    /// invalid, or [`TaskServiceError::Repository`] when the task is missing
    /// or the write fails.
    pub async fn update_task(&self, id: &TaskId, update: TaskUpdate) -> TaskServiceResult<Task> {
        let text = update
            .text
            .as_deref()
            .map(|raw| self.rules.validate_text(raw))
            .transpose()?;
        let checked = TaskUpdate {
            text,
            completed: update.completed,
        };
        Ok(self.repository.update(id, &checked).await?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MissingId`] when `id` is empty, or
    /// [`TaskServiceError::Repository`] when the task is missing or the
    /// write fails.
    pub async fn delete_task(&self, id: &TaskId) -> TaskServiceResult<()> {
        if id.is_empty() {
            return Err(TaskDomainError::MissingId.into());
        }
        self.repository.delete(id).await?;
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Flips the completion flag of a task and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task has `id`, or
    /// another repository error when reading or writing fails.
    pub async fn toggle_task(&self, id: &TaskId) -> TaskServiceResult<Task> {
        let current = self
            .find_task(id)
            .await?
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        let update = TaskUpdate::new().with_completed(!current.is_completed());
        Ok(self.repository.update(id, &update).await?)
    }

    /// Looks up a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store denies
    /// access.
    pub async fn find_task(&self, id: &TaskId) -> TaskServiceResult<Option<Task>> {
        let tasks = self.get_tasks().await?;
        Ok(tasks.into_iter().find(|task| task.id() == id))
    }

    /// Returns every task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store denies
    /// access.
    pub async fn get_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.get_all().await?)
    }

    /// Returns the tasks selected by `filter`, in insertion order.
    ///
    /// String selectors other than `"active"` and `"completed"` select
    /// every task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store denies
    /// access.
    pub async fn get_filtered_tasks(
        &self,
        filter: impl Into<TaskFilter> + Send,
    ) -> TaskServiceResult<Vec<Task>> {
        let selected: TaskFilter = filter.into();
        Ok(selected.apply(self.get_tasks().await?))
    }

    /// Returns counts of all, completed and active tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store denies
    /// access.
    pub async fn get_task_stats(&self) -> TaskServiceResult<TaskStats> {
        let tasks = self.get_tasks().await?;
        Ok(TaskStats::from_tasks(&tasks))
    }

    /// Deletes every completed task and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when reading or writing
    /// fails.
    pub async fn clear_completed(&self) -> TaskServiceResult<usize> {
        let completed: Vec<TaskId> = self
            .get_filtered_tasks(TaskFilter::Completed)
            .await?
            .into_iter()
            .map(|task| task.id().clone())
            .collect();
        if completed.is_empty() {
            return Ok(0);
        }
        let removed = self.repository.delete_many(&completed).await?;
        debug!(removed, "cleared completed tasks");
        Ok(removed)
    }
}
