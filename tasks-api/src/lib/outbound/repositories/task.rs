use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::TaskWithOwner;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;

const OWNER_FOREIGN_KEY: &str = "tasks_user_id_fkey";

#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    user_id: i64,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct TaskWithOwnerRow {
    #[sqlx(flatten)]
    task: TaskRow,
    owner_name: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            title: TaskTitle::new(row.title)?,
            description: row.description,
            completed: row.completed,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
        })
    }
}

impl TryFrom<TaskWithOwnerRow> for TaskWithOwner {
    type Error = TaskError;

    fn try_from(row: TaskWithOwnerRow) -> Result<Self, Self::Error> {
        let owner_name = UserName::new(row.owner_name)
            .map_err(|e| TaskError::DatabaseError(format!("Stored owner name is invalid: {}", e)))?;

        Ok(TaskWithOwner {
            task: row.task.try_into()?,
            owner_name,
        })
    }
}

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, user_id: &UserId) -> TaskError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() && db_err.constraint() == Some(OWNER_FOREIGN_KEY) {
            return TaskError::OwnerNotFound(user_id.to_string());
        }
    }
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: CreateTaskCommand) -> Result<Task, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, description, completed, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, description, completed, user_id, created_at
            "#,
        )
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.user_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &task.user_id))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, description, completed, user_id, created_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?
        .map(Task::try_from)
        .transpose()
    }

    async fn list_with_owner(&self) -> Result<Vec<TaskWithOwner>, TaskError> {
        let rows = sqlx::query_as::<_, TaskWithOwnerRow>(
            r#"
            SELECT t.id, t.title, t.description, t.completed, t.user_id, t.created_at,
                   u.name AS owner_name
            FROM tasks t
            JOIN users u ON u.id = t.user_id
            ORDER BY t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(TaskWithOwner::try_from).collect()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, completed = $4, user_id = $5
            WHERE id = $1
            RETURNING id, title, description, completed, user_id, created_at
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(&task.description)
        .bind(task.completed)
        .bind(task.user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &task.user_id))?;

        match row {
            Some(row) => row.try_into(),
            None => Err(TaskError::NotFound(task.id.to_string())),
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
