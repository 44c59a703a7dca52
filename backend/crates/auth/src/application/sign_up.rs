//! Sign Up Use Case
//!
//! Creates a new account with a generated profile.

use std::sync::Arc;

use crate::application::{config::AuthConfig, run_blocking};
use crate::domain::entity::{account::Account, identity::PublicIdentity, profile::Profile};
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email,
    nickname::Nickname,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: IdentityStore,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignUpUseCase<R>
where
    R: IdentityStore,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<PublicIdentity> {
        let email = Email::new(input.email)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        // Validate and hash password
        let raw_password = RawPassword::new(input.password)?;
        let hasher = self.config.password_hasher;
        let password_hash =
            run_blocking(move || UserPassword::from_raw(&raw_password, &hasher)).await??;

        let account = Account::new(email, password_hash);
        let profile = Profile::new(Nickname::generate());

        self.repo.create_account(&account, &profile).await?;

        tracing::info!(
            user_id = %account.user_id,
            nickname = %profile.nickname,
            "Account registered"
        );

        Ok(PublicIdentity::new(&account, profile))
    }
}
