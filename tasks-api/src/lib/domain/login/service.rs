use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::login::errors::LoginError;
use crate::domain::login::models::LoginCommand;
use crate::domain::login::models::LoginOutcome;
use crate::domain::login::ports::LoginServicePort;
use crate::domain::user::ports::UserRepository;

/// Credential verification flow.
///
/// Looks the identity up by email, compares the password against the stored
/// bcrypt hash and, on success, signs a token carrying `{id, email, name}`.
/// No attempt counting or lockout is performed.
pub struct LoginService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> LoginService<UR>
where
    UR: UserRepository,
{
    /// Create a new login service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation used for lookups
    /// * `authenticator` - Shared authenticator holding the signing secret
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> LoginServicePort for LoginService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, LoginError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| LoginError::UserNotFound(command.email.to_string()))?;

        let claims = Claims::for_identity(user.id.0, user.email.as_str(), user.name.as_str());
        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let stored_hash = user.password_hash.clone();

        // bcrypt is CPU bound; keep it off the async workers
        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.as_str(), &stored_hash, &claims)
        })
        .await
        .map_err(|e| LoginError::Unknown(format!("Login task failed: {}", e)))?;

        match result {
            Ok(authentication) => {
                tracing::info!(user_id = %user.id, "User logged in");
                Ok(LoginOutcome {
                    user,
                    token: authentication.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login rejected: invalid password");
                Err(LoginError::InvalidCredentials)
            }
            Err(AuthenticationError::JwtError(e)) => Err(LoginError::TokenGeneration(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::Password;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserName;

    const SECRET: &[u8] = b"login-service-secret-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn registered_user(password: &str) -> User {
        User {
            id: UserId(5),
            email: EmailAddress::new("maria@example.com".to_string()).unwrap(),
            name: UserName::new("Maria".to_string()).unwrap(),
            age: None,
            password_hash: PasswordHasher::with_cost(4).hash(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn command(email: &str, password: &str) -> LoginCommand {
        LoginCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    fn service(repository: MockTestUserRepository) -> LoginService<MockTestUserRepository> {
        LoginService::new(Arc::new(repository), Arc::new(Authenticator::new(SECRET)))
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repository = MockTestUserRepository::new();

        let user = registered_user("correct horse");
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "maria@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let outcome = service(repository)
            .login(command("maria@example.com", "correct horse"))
            .await
            .unwrap();

        assert_eq!(outcome.user.id, UserId(5));
        assert_eq!(outcome.token.matches('.').count(), 2);

        let claims = Authenticator::new(SECRET)
            .validate_token(&outcome.token)
            .unwrap();
        assert_eq!(claims.id, 5);
        assert_eq!(claims.email, "maria@example.com");
        assert_eq!(claims.name, "Maria");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(repository)
            .login(command("x@x.com", "whatever"))
            .await;

        assert!(matches!(result, Err(LoginError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repository = MockTestUserRepository::new();

        let user = registered_user("correct horse");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repository)
            .login(command("maria@example.com", "battery staple"))
            .await;

        assert!(matches!(result, Err(LoginError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_repository_failure() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(UserError::DatabaseError("connection reset".to_string())));

        let result = service(repository)
            .login(command("maria@example.com", "whatever"))
            .await;

        assert!(matches!(result, Err(LoginError::Repository(_))));
    }

    #[tokio::test]
    async fn test_login_token_rejected_by_other_secret() {
        let mut repository = MockTestUserRepository::new();

        let user = registered_user("correct horse");
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let outcome = service(repository)
            .login(command("maria@example.com", "correct horse"))
            .await
            .unwrap();

        let other = Authenticator::new(b"a-completely-different-secret-value!!");
        assert!(other.validate_token(&outcome.token).is_err());
    }
}
