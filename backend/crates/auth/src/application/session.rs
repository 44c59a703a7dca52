//! Session Issuer
//!
//! Login and refresh both end in [`SessionIssuer::issue`]: sign an access
//! and a refresh token, persist a hash of the refresh token, then hand both
//! back with their cookie policies. Tokens are only returned once the hash
//! write has committed.

use std::sync::Arc;

use kernel::id::UserId;
use platform::authorization::BasicCredentials;
use platform::cookie::CookiePolicy;
use platform::password::ClearTextPassword;

use crate::application::{config::AuthConfig, run_blocking, token::TokenSigner};
use crate::domain::entity::account::Account;
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email, refresh_token_hash::RefreshTokenHash, token_kind::TokenKind,
};
use crate::error::{AuthError, AuthResult};

/// Email and password presented at login
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: ClearTextPassword,
}

impl From<BasicCredentials> for Credentials {
    fn from(credentials: BasicCredentials) -> Self {
        Self {
            email: credentials.user_id,
            password: credentials.password,
        }
    }
}

/// A freshly issued token pair
#[derive(Debug, Clone)]
pub struct SessionBundle {
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of a login or refresh
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub subject: UserId,
    pub tokens: SessionBundle,
    pub access_cookie: CookiePolicy,
    pub refresh_cookie: CookiePolicy,
}

pub struct SessionIssuer<R>
where
    R: IdentityStore,
{
    repo: Arc<R>,
    signer: Arc<TokenSigner>,
    config: Arc<AuthConfig>,
}

impl<R> SessionIssuer<R>
where
    R: IdentityStore,
{
    pub fn new(repo: Arc<R>, signer: Arc<TokenSigner>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            signer,
            config,
        }
    }

    /// Authenticate by email and password, then issue a session
    pub async fn login(&self, credentials: Credentials) -> AuthResult<IssuedSession> {
        let account = match self.resolve_identity(&credentials.email).await {
            Ok(account) => account,
            Err(AuthError::InvalidEmail) => {
                self.spend_hash(credentials.password).await;
                return Err(AuthError::InvalidEmail);
            }
            Err(e) => return Err(e),
        };
        self.verify_secret(&account, credentials.password).await?;

        tracing::info!(user_id = %account.user_id, "Login succeeded");

        self.issue(account.user_id).await
    }

    /// Issue a new session for a subject the gate already authenticated
    pub async fn refresh(&self, subject: UserId) -> AuthResult<IssuedSession> {
        let session = self.issue(subject).await?;

        tracing::info!(user_id = %subject, "Tokens refreshed");

        Ok(session)
    }

    async fn resolve_identity(&self, email: &str) -> AuthResult<Account> {
        // An address that fails validation cannot belong to any account
        let email = Email::new(email).map_err(|_| AuthError::InvalidEmail)?;

        self.repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidEmail)
    }

    async fn verify_secret(
        &self,
        account: &Account,
        password: ClearTextPassword,
    ) -> AuthResult<()> {
        let password_hash = account.password_hash.clone();
        let matches = run_blocking(move || password_hash.verify(&password)).await?;

        if !matches {
            return Err(AuthError::InvalidPassword);
        }
        Ok(())
    }

    /// Hash the presented password and discard the result
    ///
    /// An unknown email then costs about as much as a wrong password.
    async fn spend_hash(&self, password: ClearTextPassword) {
        let hasher = self.config.password_hasher;
        if let Ok(Err(e)) = run_blocking(move || hasher.hash(password.as_bytes())).await {
            tracing::warn!(error = %e, "Hash for unknown email failed");
        }
    }

    async fn issue(&self, subject: UserId) -> AuthResult<IssuedSession> {
        let access_token = self.signer.sign(
            &subject,
            TokenKind::Access,
            self.config.token_ttl(TokenKind::Access),
        )?;
        let refresh_token = self.signer.sign(
            &subject,
            TokenKind::Refresh,
            self.config.token_ttl(TokenKind::Refresh),
        )?;

        let hasher = self.config.password_hasher;
        let token = refresh_token.clone();
        let refresh_hash = run_blocking(move || RefreshTokenHash::from_token(&token, &hasher))
            .await?
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // The account can disappear between the gate check and this write
        self.repo
            .set_refresh_hash(&subject, &refresh_hash)
            .await
            .map_err(|e| match e {
                AuthError::Database(sqlx::Error::RowNotFound) => AuthError::Unauthenticated,
                other => other,
            })?;

        Ok(IssuedSession {
            subject,
            tokens: SessionBundle {
                access_token,
                refresh_token,
            },
            access_cookie: self.config.cookie_policy(TokenKind::Access),
            refresh_cookie: self.config.cookie_policy(TokenKind::Refresh),
        })
    }
}
