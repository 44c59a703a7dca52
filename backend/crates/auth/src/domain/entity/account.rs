//! Account Entity
//!
//! Credential record for one user. Never leaves the service: handlers
//! only ever see [`PublicIdentity`](super::identity::PublicIdentity).

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, refresh_token_hash::RefreshTokenHash, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub user_id: UserId,
    /// Login identifier (unique)
    pub email: Email,
    pub password_hash: UserPassword,
    /// Hash of the latest refresh token, `None` until the first login
    pub refresh_token_hash: Option<RefreshTokenHash>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            refresh_token_hash: None,
            created_at: Utc::now(),
        }
    }
}
