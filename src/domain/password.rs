//! Password value object - salted one-way hashing and verification.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::errors::{AppError, AppResult};

/// A stored password hash.
///
/// Plain text never lives in this type; it only passes through `hash` and
/// `verify`.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with a fresh random salt.
    ///
    /// Policy checks (length, confirmation) are the caller's job; see
    /// [`crate::domain::validate_password_rule`].
    pub fn hash(plain_text: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::Hashing(e.to_string()))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash (from storage).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A stored value that is not a parseable hash never verifies.
    pub fn verify(&self, plain_text: &str) -> AppResult<()> {
        let parsed = PasswordHash::new(&self.hash).map_err(|e| {
            tracing::warn!("Stored password hash is malformed: {}", e);
            AppError::InvalidPassword
        })?;

        Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .map_err(|_| AppError::InvalidPassword)
    }

    /// Argon2id with the crate's default cost parameters.
    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
