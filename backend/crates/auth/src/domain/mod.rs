//! Domain Layer
//!
//! Contains entities, value objects, and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::Account, identity::PublicIdentity, profile::Profile};
pub use repository::IdentityStore;
pub use value_object::{access_requirement::AccessRequirement, token_kind::TokenKind};
