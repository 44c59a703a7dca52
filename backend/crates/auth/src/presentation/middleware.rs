//! Request Gate
//!
//! Route-level authentication. Every route is looked up in an
//! [`AccessPolicy`] by method and matched path; routes without an entry
//! require a valid access token.
//!
//! For token-protected routes the gate reads the cookie for the required
//! kind, verifies it, checks the `type` claim and loads the subject. On
//! success an [`AuthContext`] is attached to the request extensions.
//! Every failure is reported as the same 401.

use axum::extract::{FromRequestParts, MatchedPath, Request, State};
use axum::http::{Method, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenSigner;
use crate::domain::entity::identity::PublicIdentity;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{access_requirement::AccessRequirement, token_kind::TokenKind};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Route Table
// ============================================================================

/// Explicit per-route requirements keyed by `(method, route path)`
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    routes: HashMap<(Method, String), AccessRequirement>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, method: Method, path: &str, requirement: AccessRequirement) -> Self {
        self.routes.insert((method, path.to_string()), requirement);
        self
    }

    /// Requirement for a route; unlisted and unmatched routes need access
    pub fn requirement(&self, method: &Method, path: Option<&str>) -> AccessRequirement {
        path.and_then(|path| self.routes.get(&(method.clone(), path.to_string())))
            .copied()
            .unwrap_or_default()
    }
}

// ============================================================================
// Gate
// ============================================================================

/// Identity attached to an authenticated request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: PublicIdentity,
    /// The raw token that authenticated the request
    pub token: String,
    pub kind: TokenKind,
}

/// Middleware state
#[derive(Clone)]
pub struct RequestGate<R>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub signer: Arc<TokenSigner>,
    pub config: Arc<AuthConfig>,
    pub policy: Arc<AccessPolicy>,
}

impl<R> RequestGate<R>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    /// Decide whether a request may proceed
    ///
    /// `Ok(None)` for public routes, `Ok(Some(_))` once a token of the
    /// required kind has been verified and its subject still exists.
    pub async fn evaluate(
        &self,
        requirement: AccessRequirement,
        cookies: &CookieJar,
    ) -> AuthResult<Option<AuthContext>> {
        let Some(expected) = requirement.token_kind() else {
            return Ok(None);
        };

        let token = cookies
            .get(self.config.cookie_name(expected))
            .map(|cookie| cookie.value().to_string())
            .ok_or(AuthError::Unauthenticated)?;

        let payload = self.signer.verify(&token).map_err(|e| {
            tracing::debug!(reason = %e, expected = %expected, "Token rejected");
            AuthError::Unauthenticated
        })?;

        if payload.kind != expected {
            tracing::debug!(presented = %payload.kind, expected = %expected, "Token kind mismatch");
            return Err(AuthError::Unauthenticated);
        }

        let identity = self
            .repo
            .find_by_id(&payload.subject)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %payload.subject, "Token subject no longer exists");
                AuthError::Unauthenticated
            })?;

        Ok(Some(AuthContext {
            identity,
            token,
            kind: payload.kind,
        }))
    }
}

/// Middleware applied to every route
pub async fn request_gate<R>(
    State(gate): State<RequestGate<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string());
    let requirement = gate.policy.requirement(req.method(), path.as_deref());

    let cookies = CookieJar::from_headers(req.headers());

    if let Some(context) = gate.evaluate(requirement, &cookies).await? {
        req.extensions_mut().insert(context);
    }

    Ok(next.run(req).await)
}

// ============================================================================
// Extractor
// ============================================================================

/// The authenticated caller, as attached by [`request_gate`]
pub struct CurrentUser(pub AuthContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::Unauthenticated)
    }
}
