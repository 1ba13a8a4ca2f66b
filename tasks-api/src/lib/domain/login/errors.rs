use thiserror::Error;

use crate::user::errors::UserError;

/// Failure modes of the credential verification flow
#[derive(Debug, Clone, Error)]
pub enum LoginError {
    #[error("User not found with email: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User lookup failed: {0}")]
    Repository(#[from] UserError),

    #[error("Token generation failed: {0}")]
    TokenGeneration(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
