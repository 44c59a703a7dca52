//! Refresh Token Hash
//!
//! Only a hash of the most recently issued refresh token is persisted.
//! It uses the same Argon2id hasher as passwords.

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{HashedPassword, PasswordHasher};
use std::fmt;

use super::user_password::hash_error;

#[derive(Clone, PartialEq, Eq)]
pub struct RefreshTokenHash(HashedPassword);

impl RefreshTokenHash {
    pub fn from_token(token: &str, hasher: &PasswordHasher) -> AppResult<Self> {
        hasher
            .hash(token.as_bytes())
            .map(Self)
            .map_err(hash_error)
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid refresh token hash in database",
            )
        })?;
        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Whether `token` is the refresh token this hash was made from
    pub fn matches(&self, token: &str) -> bool {
        self.0.verify(token.as_bytes())
    }
}

impl fmt::Debug for RefreshTokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshTokenHash([HASH])")
    }
}
