//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::app_error::AppError;
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{account::Account, identity::PublicIdentity, profile::Profile};
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email, nickname::Nickname, refresh_token_hash::RefreshTokenHash,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed identity store
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl IdentityStore for PgIdentityStore {
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create_account(&self, account: &Account, profile: &Profile) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                refresh_token_hash,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.user_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.refresh_token_hash.as_ref().map(|h| h.as_phc_string()))
        .bind(account.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id,
                nickname,
                first_name,
                last_name,
                avatar_url,
                bio,
                dob
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.user_id.as_uuid())
        .bind(profile.nickname.as_str())
        .bind(profile.first_name.as_deref())
        .bind(profile.last_name.as_deref())
        .bind(profile.avatar_url.as_deref())
        .bind(profile.bio.as_deref())
        .bind(profile.dob)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                id,
                email,
                password_hash,
                refresh_token_hash,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<PublicIdentity>> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT
                u.id,
                u.email,
                u.created_at,
                p.nickname,
                p.first_name,
                p.last_name,
                p.avatar_url,
                p.bio,
                p.dob
            FROM users u
            JOIN profiles p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(IdentityRow::into_identity))
    }

    async fn set_refresh_hash(
        &self,
        user_id: &UserId,
        hash: &RefreshTokenHash,
    ) -> AuthResult<()> {
        let updated = sqlx::query("UPDATE users SET refresh_token_hash = $2 WHERE id = $1")
            .bind(user_id.as_uuid())
            .bind(hash.as_phc_string())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AuthError::Database(sqlx::Error::RowNotFound));
        }

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    refresh_token_hash: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let id = self.id;
        let refresh_token_hash = self
            .refresh_token_hash
            .map(RefreshTokenHash::from_phc_string)
            .transpose()
            .map_err(|e| unreadable_hash(id, e))?;
        let password_hash = UserPassword::from_phc_string(self.password_hash)
            .map_err(|e| unreadable_hash(id, e))?;

        Ok(Account {
            user_id: UserId::from_uuid(id),
            email: Email::from_db(self.email),
            password_hash,
            refresh_token_hash,
            created_at: self.created_at,
        })
    }
}

fn unreadable_hash(id: Uuid, err: AppError) -> AuthError {
    AuthError::Internal(format!("stored hash for user {id} is unreadable: {err}"))
}

#[derive(sqlx::FromRow)]
struct IdentityRow {
    id: Uuid,
    email: String,
    created_at: DateTime<Utc>,
    nickname: String,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    bio: Option<String>,
    dob: Option<NaiveDate>,
}

impl IdentityRow {
    fn into_identity(self) -> PublicIdentity {
        PublicIdentity {
            id: UserId::from_uuid(self.id),
            email: Email::from_db(self.email),
            created_at: self.created_at,
            profile: Profile {
                nickname: Nickname::from_db(self.nickname),
                first_name: self.first_name,
                last_name: self.last_name,
                avatar_url: self.avatar_url,
                bio: self.bio,
                dob: self.dob,
            },
        }
    }
}
