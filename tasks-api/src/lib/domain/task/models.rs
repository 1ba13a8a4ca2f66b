use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::task::errors::TaskIdError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;

/// Task entity, owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Task joined with the name of its owner, as listed by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWithOwner {
    pub task: Task,
    pub owner_name: UserName,
}

/// Task unique identifier type, assigned by storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Parse a task ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an integer
    /// * `NotPositive` - Integer is zero or negative
    pub fn from_string(s: &str) -> Result<Self, TaskIdError> {
        let id = s
            .parse::<i64>()
            .map_err(|e| TaskIdError::InvalidFormat(format!("{}: {}", s, e)))?;

        if id > 0 {
            Ok(Self(id))
        } else {
            Err(TaskIdError::NotPositive(id))
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task title value type: trimmed, 1-200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskTitle(String);

impl TaskTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, TaskTitleError> {
        let title = title.trim().to_string();
        let length = title.chars().count();

        if length == 0 {
            Err(TaskTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Command to create a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskCommand {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: UserId,
}

/// Command to update an existing task; absent fields are left untouched.
#[derive(Debug, Default)]
pub struct UpdateTaskCommand {
    pub title: Option<TaskTitle>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub user_id: Option<UserId>,
}
