use std::sync::Arc;

use auth::Authenticator;
use auth::JwtError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiErrorData;

pub const TOKEN_MISSING: &str = "Token não informado";
pub const TOKEN_INVALID: &str = "Token inválido";

const BEARER_PREFIX: &str = "Bearer ";

/// Identity decoded from a verified token, stored in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Why a request was turned away before reaching a protected handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            AuthRejection::MissingToken => TOKEN_MISSING,
            AuthRejection::InvalidToken => TOKEN_INVALID,
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ApiErrorData {
                message: message.to_string(),
            }),
        )
            .into_response()
    }
}

/// Middleware that validates the bearer token and adds the caller to request extensions
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthRejection> {
    let user = verify_bearer(&authenticator, req.headers().get(header::AUTHORIZATION))?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Check an `Authorization` header value and decode the identity it carries.
pub fn verify_bearer(
    authenticator: &Authenticator,
    authorization: Option<&HeaderValue>,
) -> Result<AuthenticatedUser, AuthRejection> {
    let token = extract_token(authorization)?;

    let claims = authenticator.validate_token(token).map_err(|e| {
        match e {
            JwtError::TokenExpired => tracing::warn!("Rejected expired token"),
            _ => tracing::warn!(error = %e, "Rejected invalid token"),
        }
        AuthRejection::InvalidToken
    })?;

    Ok(AuthenticatedUser {
        id: UserId(claims.id),
        email: claims.email,
        name: claims.name,
    })
}

// The scheme prefix is optional: a bare token is accepted too.
fn extract_token(authorization: Option<&HeaderValue>) -> Result<&str, AuthRejection> {
    let value = authorization.ok_or(AuthRejection::MissingToken)?;
    let value = value.to_str().map_err(|_| AuthRejection::InvalidToken)?;

    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim();
    if token.is_empty() {
        return Err(AuthRejection::MissingToken);
    }

    Ok(token)
}
