use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::UserResponseData;
use crate::domain::user::models::Age;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::UserName;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::integer;
use crate::inbound::http::handlers::parse_body;
use crate::inbound::http::handlers::text;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::FieldErrors;
use crate::inbound::http::handlers::INVALID_AGE;
use crate::inbound::http::handlers::INVALID_EMAIL;
use crate::inbound::http::handlers::INVALID_NAME;
use crate::inbound::http::handlers::INVALID_PASSWORD;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let command = parse_body(payload)?.try_into_command()?;

    state
        .user_service
        .create_user(command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    email: Option<Value>,
    name: Option<Value>,
    age: Option<Value>,
    password: Option<Value>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let email = errors.required("email", INVALID_EMAIL, self.email, text, EmailAddress::new);
        let name = errors.required("name", INVALID_NAME, self.name, text, UserName::new);
        let age = errors.optional("age", INVALID_AGE, self.age, integer, Age::new);
        let password =
            errors.required("password", INVALID_PASSWORD, self.password, text, Password::new);

        match (email, name, password) {
            (Some(email), Some(name), Some(password)) if errors.is_empty() => {
                Ok(CreateUserCommand::new(email, name, age, password))
            }
            _ => Err(errors.into()),
        }
    }
}
