use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::parse_body;
use super::text;
use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use super::INVALID_EMAIL;
use super::INVALID_PASSWORD;
use crate::domain::login::models::LoginCommand;
use crate::domain::login::ports::LoginServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::inbound::http::router::AppState;

pub const LOGIN_SUCCEEDED: &str = "Login realizado com sucesso";

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = parse_body(payload)?.try_into_command()?;

    state
        .login_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|outcome| {
            ApiSuccess::new(
                StatusCode::OK,
                LoginResponseData {
                    message: LOGIN_SUCCEEDED.to_string(),
                    token: outcome.token,
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: Option<Value>,
    password: Option<Value>,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = FieldErrors::default();

        let email = errors.required("email", INVALID_EMAIL, self.email, text, EmailAddress::new);
        let password =
            errors.required("password", INVALID_PASSWORD, self.password, text, Password::new);

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(LoginCommand::new(email, password))
            }
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub token: String,
}
