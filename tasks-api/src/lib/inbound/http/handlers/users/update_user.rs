use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::UserResponseData;
use crate::domain::user::models::Age;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::integer;
use crate::inbound::http::handlers::parse_body;
use crate::inbound::http::handlers::parse_user_id;
use crate::inbound::http::handlers::text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::INVALID_AGE;
use crate::inbound::http::handlers::INVALID_EMAIL;
use crate::inbound::http::handlers::INVALID_NAME;
use crate::inbound::http::handlers::INVALID_PASSWORD;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<Value>,
    pub name: Option<Value>,
    pub age: Option<Value>,
    pub password: Option<Value>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let command = UpdateUserCommand {
            email: errors.optional("email", INVALID_EMAIL, self.email, text, EmailAddress::new),
            name: errors.optional("name", INVALID_NAME, self.name, text, UserName::new),
            age: errors.optional("age", INVALID_AGE, self.age, integer, Age::new),
            password: errors.optional(
                "password",
                INVALID_PASSWORD,
                self.password,
                text,
                Password::new,
            ),
        };

        if errors.is_empty() {
            Ok(command)
        } else {
            Err(errors.into())
        }
    }
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    // Parse user ID and request at HTTP boundary
    let user_id = parse_user_id(&id)?;
    let command = parse_body(payload)?.try_into_command()?;

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
