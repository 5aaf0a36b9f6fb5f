//! Domain model for the task list.
//!
//! The domain covers the task entity, its validation rules and the derived
//! filter and statistics views. Persistence concerns stay outside the
//! domain boundary.

mod error;
mod ids;
mod rules;
mod task;
mod view;

pub use error::TaskDomainError;
pub use ids::TaskId;
pub use rules::TaskRules;
pub use task::{PersistedTaskData, Task, TaskUpdate};
pub use view::{TaskFilter, TaskStats};
