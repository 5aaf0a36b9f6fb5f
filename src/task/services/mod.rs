//! Application services for the task list.

mod todo;

pub use todo::{TaskService, TaskServiceError, TaskServiceResult};
