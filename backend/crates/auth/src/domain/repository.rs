//! Repository Traits
//!
//! Persistence interface for accounts. Implementation is in the
//! infrastructure layer; tests use an in-memory one.

use kernel::id::UserId;

use crate::domain::entity::{account::Account, identity::PublicIdentity, profile::Profile};
use crate::domain::value_object::{email::Email, refresh_token_hash::RefreshTokenHash};
use crate::error::AuthResult;

#[trait_variant::make(IdentityStore: Send)]
pub trait LocalIdentityStore {
    /// Check if an account is registered under `email`
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Create an account together with its profile (atomically)
    async fn create_account(&self, account: &Account, profile: &Profile) -> AuthResult<()>;

    /// Find credentials for login
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    /// Find the public view of an account
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<PublicIdentity>>;

    /// Replace the stored refresh-token hash
    async fn set_refresh_hash(&self, user_id: &UserId, hash: &RefreshTokenHash)
    -> AuthResult<()>;
}
