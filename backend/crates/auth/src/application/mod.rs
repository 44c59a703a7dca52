//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod session;
pub mod sign_up;
pub mod token;

// Re-exports
pub use config::{AuthConfig, ConfigError};
pub use session::{Credentials, IssuedSession, SessionBundle, SessionIssuer};
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{TokenError, TokenPayload, TokenSigner};

use crate::error::{AuthError, AuthResult};

/// Run CPU-heavy work (Argon2) off the async worker threads
pub(crate) async fn run_blocking<F, T>(f: F) -> AuthResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("blocking task failed: {e}")))
}
