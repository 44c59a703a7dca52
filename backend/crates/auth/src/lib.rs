//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Config, token signer, session issuer, sign-up
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router, request gate
//!
//! ## Features
//! - Registration with email + password
//! - Login over `Authorization: Basic`, issuing an access and a refresh
//!   token as HttpOnly cookies
//! - Token refresh using the refresh cookie
//! - Per-route access requirements (`public`, `access`, `refresh`)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; the work factor sets the memory cost
//! - HS256 JWTs with a `type` claim so a refresh token never passes as an
//!   access token
//! - Only a hash of the latest refresh token is stored
//! - Unknown email and wrong password look the same to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{AuthConfig, ConfigError};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgIdentityStore;
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
