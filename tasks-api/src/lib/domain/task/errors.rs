use thiserror::Error;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid task ID: {0}")]
    InvalidFormat(String),

    #[error("Task ID must be positive, got {0}")]
    NotPositive(i64),
}

/// Error for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Title must not be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Owner not found: {0}")]
    OwnerNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
