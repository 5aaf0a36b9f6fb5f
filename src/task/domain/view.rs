//! Derived, read-only views over a task collection.

use super::Task;

/// View selector over the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl TaskFilter {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` when `task` belongs in this view.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }

    /// Returns the tasks that belong in this view, keeping their order.
    #[must_use]
    pub fn apply(self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Unrecognized values fall back to [`TaskFilter::All`].
impl From<&str> for TaskFilter {
    fn from(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }
}

/// Aggregate counts over a task collection.
///
/// `active + completed == total` holds for every value built by
/// [`TaskStats::from_tasks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of tasks.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of tasks not yet completed.
    pub active: usize,
}

impl TaskStats {
    /// Counts the given tasks.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        Self {
            total,
            completed,
            active: total.saturating_sub(completed),
        }
    }
}
