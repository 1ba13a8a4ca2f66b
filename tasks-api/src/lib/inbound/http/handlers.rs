use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::domain::login::errors::LoginError;
use crate::domain::task::errors::TaskError;
use crate::domain::task::models::TaskId;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

pub mod login;
pub mod tasks;
pub mod users;

pub const USER_NOT_FOUND: &str = "Usuário não encontrado";
pub const TASK_NOT_FOUND: &str = "Tarefa não encontrada";
pub const INVALID_PASSWORD: &str = "Senha inválida";
pub const EMAIL_TAKEN: &str = "Email já cadastrado";
pub const INVALID_EMAIL: &str = "Email inválido";
pub const INVALID_NAME: &str = "Nome inválido";
pub const INVALID_AGE: &str = "Idade inválida";
pub const INVALID_TITLE: &str = "Título inválido";
pub const INVALID_USER_ID: &str = "ID do usuário inválido";
pub const INVALID_ID: &str = "ID inválido";
pub const INVALID_DESCRIPTION: &str = "Descrição inválida";
pub const INVALID_COMPLETED: &str = "Status inválido";
pub const INTERNAL_ERROR: &str = "Erro interno do servidor";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(errors) => {
                return (StatusCode::BAD_REQUEST, Json(ValidationErrorData { errors }))
                    .into_response();
            }
            ApiError::InternalServerError(detail) => {
                // Detail stays in the logs, clients get a generic message
                tracing::error!(error = %detail, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(EMAIL_TAKEN.to_string()),
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidAge(_)
            | UserError::PasswordHashing(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(_) => ApiError::NotFound(TASK_NOT_FOUND.to_string()),
            TaskError::OwnerNotFound(_) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            TaskError::InvalidTitle(_) | TaskError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::UserNotFound(_) => ApiError::NotFound(USER_NOT_FOUND.to_string()),
            LoginError::InvalidCredentials => ApiError::Unauthorized(INVALID_PASSWORD.to_string()),
            LoginError::Repository(e) => ApiError::from(e),
            LoginError::TokenGeneration(_) | LoginError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrorData {
    pub errors: Vec<FieldError>,
}

/// One rejected request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects every invalid field of a request body before rejecting it.
///
/// Request bodies keep their fields as raw JSON so a value of the wrong type is
/// reported against its own field instead of failing the whole body.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    /// Parse a field that must be present; absent, mistyped or invalid values record `message`.
    pub fn required<R, T, E>(
        &mut self,
        field: &str,
        message: &str,
        value: Option<Value>,
        extract: impl FnOnce(Value) -> Option<R>,
        parse: impl FnOnce(R) -> Result<T, E>,
    ) -> Option<T> {
        match value.and_then(extract).map(parse) {
            Some(Ok(parsed)) => Some(parsed),
            _ => {
                self.0.push(FieldError::new(field, message));
                None
            }
        }
    }

    /// Parse a field that may be absent or null; only mistyped or invalid values record `message`.
    pub fn optional<R, T, E>(
        &mut self,
        field: &str,
        message: &str,
        value: Option<Value>,
        extract: impl FnOnce(Value) -> Option<R>,
        parse: impl FnOnce(R) -> Result<T, E>,
    ) -> Option<T> {
        match value.map(|raw| extract(raw).map(parse)) {
            None => None,
            Some(Some(Ok(parsed))) => Some(parsed),
            Some(_) => {
                self.0.push(FieldError::new(field, message));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// JSON strings only.
pub fn text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// JSON integers, or strings holding one (`"12"`).
pub fn integer(value: Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn boolean(value: Value) -> Option<bool> {
    value.as_bool()
}

/// Parser for fields whose type check is the whole validation.
pub fn accept<T>(value: T) -> Result<T, std::convert::Infallible> {
    Ok(value)
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::BadRequest(errors.0)
    }
}

/// Unwrap a JSON body, turning extractor rejections into a 400 validation response.
pub fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(vec![FieldError::new("body", rejection.body_text())]))
}

pub fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_string(raw).map_err(|_| ApiError::BadRequest(vec![FieldError::new("id", INVALID_ID)]))
}

pub fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::from_string(raw).map_err(|_| ApiError::BadRequest(vec![FieldError::new("id", INVALID_ID)]))
}
