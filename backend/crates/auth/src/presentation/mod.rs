//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the request gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{AccessPolicy, AuthContext, CurrentUser, RequestGate, request_gate};
pub use router::{access_policy, auth_router, auth_router_generic};
