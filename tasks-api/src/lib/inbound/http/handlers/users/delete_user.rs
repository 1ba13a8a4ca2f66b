use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::parse_user_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&id)?;

    state.user_service.delete_user(&user_id).await?;
    tracing::info!(user_id = %user_id, requested_by = %auth_user.id, "Delete user request served");

    Ok(StatusCode::NO_CONTENT)
}
