//! Port abstraction for task persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{ActiveTask, NewTask, Task, TaskFilter, TaskId, TaskStatus, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// The owning user referenced by a new task does not exist.
        UserNotFound => "user does not exist",
    }
}

/// Storage for tasks and their accrual state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a pending task with nothing earned and return its id.
    ///
    /// Returns [`TaskPersistenceError::UserNotFound`] when `task.user_id`
    /// references no user.
    async fn create(&self, task: &NewTask) -> Result<TaskId, TaskPersistenceError>;

    /// Tasks owned by `user_id`, each carrying the owner's name.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Tasks matching `filter`, ordered as it requests.
    async fn list_filtered(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Every task currently [`TaskStatus::Running`].
    async fn list_active(&self) -> Result<Vec<ActiveTask>, TaskPersistenceError>;

    /// Persist the outcome of one accrual step.
    async fn update_earned(
        &self,
        id: TaskId,
        earned: f64,
        deadline: i32,
    ) -> Result<(), TaskPersistenceError>;

    /// Overwrite the status regardless of the current one.
    async fn update_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> Result<(), TaskPersistenceError>;

    /// Remove a task. Missing rows are not an error.
    async fn delete(&self, id: TaskId) -> Result<(), TaskPersistenceError>;
}
