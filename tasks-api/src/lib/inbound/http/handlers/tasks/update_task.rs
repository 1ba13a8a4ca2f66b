use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::TaskResponseData;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::accept;
use crate::inbound::http::handlers::boolean;
use crate::inbound::http::handlers::integer;
use crate::inbound::http::handlers::parse_body;
use crate::inbound::http::handlers::parse_task_id;
use crate::inbound::http::handlers::text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::INVALID_COMPLETED;
use crate::inbound::http::handlers::INVALID_DESCRIPTION;
use crate::inbound::http::handlers::INVALID_TITLE;
use crate::inbound::http::handlers::INVALID_USER_ID;
use crate::inbound::http::router::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub completed: Option<Value>,
    #[serde(rename = "userId")]
    pub user_id: Option<Value>,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let command = UpdateTaskCommand {
            title: errors.optional("title", INVALID_TITLE, self.title, text, TaskTitle::new),
            description: errors.optional(
                "description",
                INVALID_DESCRIPTION,
                self.description,
                text,
                accept,
            ),
            completed: errors.optional(
                "completed",
                INVALID_COMPLETED,
                self.completed,
                boolean,
                accept,
            ),
            user_id: errors.optional(
                "userId",
                INVALID_USER_ID,
                self.user_id,
                integer,
                UserId::new,
            ),
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into())
        }
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let task_id = parse_task_id(&id)?;
    let command = parse_body(payload)?.try_into_command()?;

    state
        .task_service
        .update_task(&task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
