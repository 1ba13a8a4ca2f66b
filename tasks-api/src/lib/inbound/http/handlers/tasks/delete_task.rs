use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::parse_task_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let task_id = parse_task_id(&id)?;

    state.task_service.delete_task(&task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
