use async_trait::async_trait;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::LoginCommand;
use crate::domain::login::models::LoginOutcome;

/// Port for the credential verification flow.
#[async_trait]
pub trait LoginServicePort: Send + Sync + 'static {
    /// Verify an email/password pair and issue a bearer token.
    ///
    /// # Arguments
    /// * `command` - Validated email and plaintext password
    ///
    /// # Returns
    /// The matched user and a signed token valid for 24 hours
    ///
    /// # Errors
    /// * `UserNotFound` - No user registered with this email
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Repository` - User lookup failed
    /// * `TokenGeneration` - Token could not be signed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError>;
}
