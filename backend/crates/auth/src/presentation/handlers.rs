//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{AppendHeaders, IntoResponse};
use std::sync::Arc;

use platform::authorization::{authorization_value, decode_basic, require_scheme};

use crate::application::config::AuthConfig;
use crate::application::{IssuedSession, SessionIssuer, SignUpInput, SignUpUseCase, TokenSigner};
use crate::domain::entity::identity::PublicIdentity;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::token_kind::TokenKind;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{MessageResponse, RegisterRequest};
use crate::presentation::middleware::CurrentUser;

const LOGIN_MESSAGE: MessageResponse = MessageResponse::new("login successful");
const REFRESH_MESSAGE: MessageResponse = MessageResponse::new("Token Refresh successful");

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub signer: Arc<TokenSigner>,
}

impl<R> AuthAppState<R>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let signer = TokenSigner::new(&config.jwt_secret);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            signer: Arc::new(signer),
        }
    }

    fn issuer(&self) -> SessionIssuer<R> {
        SessionIssuer::new(self.repo.clone(), self.signer.clone(), self.config.clone())
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register/email
pub async fn register_with_email<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<PublicIdentity>)>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let identity = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(identity)))
}

// ============================================================================
// Login / Refresh
// ============================================================================

/// POST /auth/login/email
///
/// Credentials come from `Authorization: Basic base64(email:password)`.
pub async fn login_with_email<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    let token = require_scheme(authorization_value(&headers)?, "basic")?;
    let credentials = decode_basic(token)?;

    let session = state.issuer().login(credentials.into()).await?;

    Ok((
        AppendHeaders(session_cookies(&state.config, &session)?),
        Json(LOGIN_MESSAGE),
    ))
}

/// POST /auth/refresh
///
/// The gate has already verified the refresh cookie.
pub async fn refresh_tokens<R>(
    State(state): State<AuthAppState<R>>,
    CurrentUser(context): CurrentUser,
) -> AuthResult<impl IntoResponse>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    let session = state.issuer().refresh(context.identity.id).await?;

    Ok((
        AppendHeaders(session_cookies(&state.config, &session)?),
        Json(REFRESH_MESSAGE),
    ))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /user/me
pub async fn current_user(CurrentUser(context): CurrentUser) -> Json<PublicIdentity> {
    Json(context.identity)
}

// ============================================================================
// Helpers
// ============================================================================

/// `Set-Cookie` values for both tokens of an issued session
fn session_cookies(
    config: &AuthConfig,
    session: &IssuedSession,
) -> AuthResult<[(header::HeaderName, HeaderValue); 2]> {
    let access = session
        .access_cookie
        .set_cookie_header(
            config.cookie_name(TokenKind::Access),
            &session.tokens.access_token,
        )
        .map_err(|e| AuthError::Internal(format!("invalid access cookie: {e}")))?;
    let refresh = session
        .refresh_cookie
        .set_cookie_header(
            config.cookie_name(TokenKind::Refresh),
            &session.tokens.refresh_token,
        )
        .map_err(|e| AuthError::Internal(format!("invalid refresh cookie: {e}")))?;

    Ok([(header::SET_COOKIE, access), (header::SET_COOKIE, refresh)])
}
