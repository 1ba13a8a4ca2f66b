use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskWithOwner;

pub mod create_task;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod update_task;

pub use create_task::create_task;
pub use delete_task::delete_task;
pub use get_task::get_task;
pub use list_tasks::list_tasks;
pub use update_task::update_task;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponseData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.0,
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            completed: task.completed,
            user_id: task.user_id.0,
            created_at: task.created_at,
        }
    }
}

/// Listed task, carrying its owner's name under `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListItemData {
    #[serde(flatten)]
    pub task: TaskResponseData,
    pub user: TaskOwnerData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOwnerData {
    pub name: String,
}

impl From<&TaskWithOwner> for TaskListItemData {
    fn from(item: &TaskWithOwner) -> Self {
        Self {
            task: (&item.task).into(),
            user: TaskOwnerData {
                name: item.owner_name.as_str().to_string(),
            },
        }
    }
}
