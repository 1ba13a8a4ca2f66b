use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::TaskResponseData;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::parse_task_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<TaskResponseData>, ApiError> {
    let task_id = parse_task_id(&id)?;

    state
        .task_service
        .get_task(&task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
