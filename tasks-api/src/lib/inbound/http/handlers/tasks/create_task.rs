use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::TaskResponseData;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::accept;
use crate::inbound::http::handlers::boolean;
use crate::inbound::http::handlers::integer;
use crate::inbound::http::handlers::parse_body;
use crate::inbound::http::handlers::text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::INVALID_COMPLETED;
use crate::inbound::http::handlers::INVALID_DESCRIPTION;
use crate::inbound::http::handlers::INVALID_TITLE;
use crate::inbound::http::handlers::INVALID_USER_ID;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let command = parse_body(payload)?.try_into_command()?;

    tracing::debug!(
        requested_by = %auth_user.id,
        owner = %command.user_id,
        "Create task request"
    );

    state
        .task_service
        .create_task(command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: Option<Value>,
    description: Option<Value>,
    completed: Option<Value>,
    #[serde(rename = "userId")]
    user_id: Option<Value>,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let title = errors.required("title", INVALID_TITLE, self.title, text, TaskTitle::new);
        let description =
            errors.optional("description", INVALID_DESCRIPTION, self.description, text, accept);
        let completed =
            errors.optional("completed", INVALID_COMPLETED, self.completed, boolean, accept);
        let user_id =
            errors.required("userId", INVALID_USER_ID, self.user_id, integer, UserId::new);

        match (title, user_id) {
            (Some(title), Some(user_id)) if errors.is_empty() => Ok(CreateTaskCommand {
                title,
                description,
                completed: completed.unwrap_or(false),
                user_id,
            }),
            _ => Err(errors.into()),
        }
    }
}
