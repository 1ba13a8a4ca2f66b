use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskWithOwner;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(&self, command: CreateTaskCommand) -> Result<Task, TaskError> {
        let task = self.repository.create(command).await?;
        tracing::info!(task_id = %task.id, user_id = %task.user_id, "Task created");

        Ok(task)
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))
    }

    async fn list_tasks(&self) -> Result<Vec<TaskWithOwner>, TaskError> {
        self.repository.list_with_owner().await
    }

    async fn update_task(
        &self,
        id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))?;

        if let Some(title) = command.title {
            task.title = title;
        }

        if let Some(description) = command.description {
            task.description = Some(description);
        }

        if let Some(completed) = command.completed {
            task.completed = completed;
        }

        if let Some(user_id) = command.user_id {
            task.user_id = user_id;
        }

        self.repository.update(task).await
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError> {
        self.repository.delete(id).await?;
        tracing::info!(task_id = %id, "Task deleted");

        Ok(())
    }
}
