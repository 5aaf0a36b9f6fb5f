//! Task entity and partial-update types.

use super::TaskId;
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;

/// A short text task tracked by the list.
///
/// `id` and `created_at` are fixed at creation; `text` and `completed`
/// change only through [`Task::merged`], which returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted task text.
    pub text: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, incomplete task stamped with the clock's current time.
    ///
    /// The timestamp is truncated to whole milliseconds, the precision it is
    /// persisted with. The text is stored as given; callers validate it
    /// first with [`super::TaskRules::validate_text`].
    #[must_use]
    pub fn new(text: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::generate(clock),
            text: text.into(),
            completed: false,
            created_at: clock.utc().trunc_subsecs(3),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns a copy of this task with the fields present in `update`
    /// overwritten.
    ///
    /// The identifier and creation timestamp are always carried over.
    #[must_use]
    pub fn merged(&self, update: &TaskUpdate) -> Self {
        Self {
            id: self.id.clone(),
            text: update.text.clone().unwrap_or_else(|| self.text.clone()),
            completed: update.completed.unwrap_or(self.completed),
            created_at: self.created_at,
        }
    }
}

/// Set of optional field overrides applied by an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Replacement text, if any.
    pub text: Option<String>,
    /// Replacement completion flag, if any.
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets replacement text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the replacement completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns `true` when no field would be overwritten.
    ///
    /// Repositories skip the write for such updates.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}
