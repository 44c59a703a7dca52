//! Auth Router

use axum::{
    Router,
    http::Method,
    middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::access_requirement::AccessRequirement;
use crate::infra::postgres::PgIdentityStore;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AccessPolicy, RequestGate, request_gate};

pub const REGISTER_EMAIL_PATH: &str = "/auth/register/email";
pub const LOGIN_EMAIL_PATH: &str = "/auth/login/email";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const CURRENT_USER_PATH: &str = "/user/me";

/// Requirements for the routes this crate serves
pub fn access_policy() -> AccessPolicy {
    AccessPolicy::new()
        .with(Method::POST, REGISTER_EMAIL_PATH, AccessRequirement::Public)
        .with(Method::POST, LOGIN_EMAIL_PATH, AccessRequirement::Public)
        .with(Method::POST, REFRESH_PATH, AccessRequirement::Refresh)
        .with(Method::GET, CURRENT_USER_PATH, AccessRequirement::Access)
}

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgIdentityStore, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
///
/// Routes are registered at their full paths so the gate sees the same
/// path the policy was written against.
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: IdentityStore + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(repo, config);
    let gate = RequestGate {
        repo: state.repo.clone(),
        signer: state.signer.clone(),
        config: state.config.clone(),
        policy: Arc::new(access_policy()),
    };

    Router::new()
        .route(REGISTER_EMAIL_PATH, post(handlers::register_with_email::<R>))
        .route(LOGIN_EMAIL_PATH, post(handlers::login_with_email::<R>))
        .route(REFRESH_PATH, post(handlers::refresh_tokens::<R>))
        .route(CURRENT_USER_PATH, get(handlers::current_user))
        .route_layer(middleware::from_fn_with_state(gate, request_gate::<R>))
        .with_state(state)
}
