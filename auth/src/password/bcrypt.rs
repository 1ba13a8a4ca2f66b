use super::errors::PasswordError;

/// Work factor applied to every stored password hash.
pub const DEFAULT_COST: u32 = 10;

/// Password hashing implementation.
///
/// Provides salted adaptive password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with a work factor of 10
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Create a password hasher with a custom work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost (4..=31)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Work factor used by `hash`.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different strings.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt format hash (`$2b$<cost>$<salt><digest>`)
    ///
    /// # Errors
    /// * `HashingFailed` - Invalid cost or hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        ::bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Salt and cost are read back from the stored hash. A hash that cannot be
    /// parsed counts as a mismatch.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        ::bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
