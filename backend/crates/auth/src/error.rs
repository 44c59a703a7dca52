//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Unknown-email and wrong-password are kept apart so logs can tell them
//! apart, but both reach the client as the same 401 body.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::authorization::AuthorizationHeaderError;
use thiserror::Error;

use crate::application::token::TokenError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Client-facing message shared by both credential failures
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Authorization header missing or not `<scheme> <token>`
    #[error("Invalid Authorization header format")]
    MalformedHeader,

    /// Authorization header uses a scheme other than the one required
    #[error("Unsupported authentication scheme: {0}")]
    UnsupportedScheme(String),

    /// Basic payload is not base64 of `user:password`
    #[error("Invalid credentials encoding")]
    MalformedCredentials,

    /// No account registered for the presented email
    #[error("No account registered for this email")]
    InvalidEmail,

    /// Account exists but the password does not match
    #[error("Password does not match")]
    InvalidPassword,

    /// Token rejected by the signer
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Gate rejected the request
    #[error("Authentication required")]
    Unauthenticated,

    /// Registration with an email that is already in use
    #[error("Email already exists")]
    EmailTaken,

    /// Input rejected by a value object
    #[error(transparent)]
    Validation(#[from] AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MalformedHeader
            | AuthError::UnsupportedScheme(_)
            | AuthError::MalformedCredentials => ErrorKind::BadRequest,
            AuthError::InvalidEmail
            | AuthError::InvalidPassword
            | AuthError::AuthenticationFailed(_)
            | AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Validation(e) => e.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the error returned to the client
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::InvalidEmail | AuthError::InvalidPassword => {
                AppError::unauthorized(INVALID_CREDENTIALS_MESSAGE)
            }
            AuthError::Validation(e) if e.is_server_error() => {
                AppError::new(e.kind(), "Internal server error")
            }
            AuthError::Validation(e) => e,
            AuthError::Database(e) => AppError::from(e),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Validation(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Auth internal error");
            }
            AuthError::InvalidEmail => {
                tracing::warn!("Login attempt for unknown email");
            }
            AuthError::InvalidPassword => {
                tracing::warn!("Login attempt with wrong password");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AuthorizationHeaderError> for AuthError {
    fn from(err: AuthorizationHeaderError) -> Self {
        match err {
            AuthorizationHeaderError::MalformedHeader => AuthError::MalformedHeader,
            AuthorizationHeaderError::UnsupportedScheme(scheme) => {
                AuthError::UnsupportedScheme(scheme)
            }
            AuthorizationHeaderError::MalformedCredentials => AuthError::MalformedCredentials,
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid | TokenError::Expired => {
                AuthError::AuthenticationFailed(err.to_string())
            }
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}
