use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of every issued token.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// JWT claims describing an authenticated identity.
///
/// `iat` and `exp` are RFC 7519 Unix timestamps (seconds).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Identity identifier
    pub id: i64,

    /// Identity email address
    pub email: String,

    /// Identity display name
    pub name: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for an identity, issued now.
    ///
    /// # Arguments
    /// * `id` - Identity identifier
    /// * `email` - Identity email address
    /// * `name` - Identity display name
    ///
    /// # Returns
    /// Claims valid for `TOKEN_LIFETIME_HOURS` from now
    pub fn for_identity(id: i64, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self::issued_at(id, email, name, Utc::now())
    }

    /// Create claims for an identity issued at a given instant.
    pub fn issued_at(
        id: i64,
        email: impl Into<String>,
        name: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_LIFETIME_HOURS);

        Self {
            id,
            email: email.into(),
            name: name.into(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
        }
    }
}
