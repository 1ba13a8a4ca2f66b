use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskWithOwner;
use crate::domain::task::models::UpdateTaskCommand;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task for an existing user.
    ///
    /// # Errors
    /// * `OwnerNotFound` - `user_id` does not reference a user
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError>;

    /// Retrieve task by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError>;

    /// List every task with its owner's name.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self) -> Result<Vec<TaskWithOwner>, TaskError>;

    /// Apply a partial update to a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `OwnerNotFound` - New `user_id` does not reference a user
    /// * `DatabaseError` - Database operation failed
    async fn update_task(&self, id: &TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete a task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Insert a task; storage assigns `id` and `created_at`.
    ///
    /// # Errors
    /// * `OwnerNotFound` - Referenced user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: CreateTaskCommand) -> Result<Task, TaskError>;

    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;

    /// All tasks joined with their owner's name, ordered by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_with_owner(&self) -> Result<Vec<TaskWithOwner>, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `OwnerNotFound` - Referenced user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
}
