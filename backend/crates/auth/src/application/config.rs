//! Application Configuration
//!
//! Configuration for the Auth application layer, read once at startup.

use std::time::Duration;

use platform::cookie::CookiePolicy;
use platform::crypto::random_bytes;
use platform::duration::{DurationParseError, parse_duration};
use platform::password::{PasswordHashError, PasswordHasher};
use thiserror::Error;

use crate::domain::value_object::token_kind::TokenKind;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

pub const DEFAULT_ACCESS_TOKEN_TTL: &str = "3600s";
pub const DEFAULT_REFRESH_TOKEN_TTL: &str = "7D";

/// Length of the secret generated for development builds
const DEV_SECRET_LEN: usize = 32;

/// Invalid or missing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set")]
    MissingSecret,

    #[error("{name}: {source}")]
    InvalidTtl {
        name: &'static str,
        #[source]
        source: DurationParseError,
    },

    #[error("{0} must be longer than zero")]
    ZeroTtl(&'static str),

    #[error("HASH_WORK_FACTOR: {0}")]
    InvalidWorkFactor(String),

    #[error("{name}: unrecognized value {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

impl From<PasswordHashError> for ConfigError {
    fn from(err: PasswordHashError) -> Self {
        ConfigError::InvalidWorkFactor(err.to_string())
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC key for signing both token kinds
    pub jwt_secret: Vec<u8>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Hasher for passwords and refresh-token hashes
    pub password_hasher: PasswordHasher,
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            access_token_ttl: Duration::from_secs(3600),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            password_hasher: PasswordHasher::default(),
            access_cookie_name: "accessToken".to_string(),
            refresh_cookie_name: "refreshToken".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self {
            jwt_secret: random_bytes(DEV_SECRET_LEN),
            ..Default::default()
        }
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`
    ///
    /// Unset and empty variables fall back to defaults, except
    /// `JWT_SECRET` which is required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let jwt_secret = get("JWT_SECRET")
            .ok_or(ConfigError::MissingSecret)?
            .into_bytes();

        let access_token_ttl = read_ttl(
            "ACCESS_TOKEN_TTL",
            get("ACCESS_TOKEN_TTL").as_deref().unwrap_or(DEFAULT_ACCESS_TOKEN_TTL),
        )?;
        let refresh_token_ttl = read_ttl(
            "REFRESH_TOKEN_TTL",
            get("REFRESH_TOKEN_TTL").as_deref().unwrap_or(DEFAULT_REFRESH_TOKEN_TTL),
        )?;

        let password_hasher = match get("HASH_WORK_FACTOR") {
            Some(raw) => {
                let work_factor: u32 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidWorkFactor(format!("not a number: {raw:?}")))?;
                PasswordHasher::new(work_factor)?
            }
            None => defaults.password_hasher,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                name: "COOKIE_SECURE",
                value: raw,
            })?,
            None => defaults.cookie_secure,
        };

        let cookie_same_site = match get("COOKIE_SAME_SITE") {
            Some(raw) => SameSite::parse(&raw).ok_or(ConfigError::InvalidValue {
                name: "COOKIE_SAME_SITE",
                value: raw,
            })?,
            None => defaults.cookie_same_site,
        };

        Ok(Self {
            jwt_secret,
            access_token_ttl,
            refresh_token_ttl,
            password_hasher,
            cookie_secure,
            cookie_same_site,
            ..defaults
        })
    }

    pub fn token_ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_token_ttl,
            TokenKind::Refresh => self.refresh_token_ttl,
        }
    }

    pub fn cookie_name(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.access_cookie_name,
            TokenKind::Refresh => &self.refresh_cookie_name,
        }
    }

    /// Cookie attributes for a token of `kind`; lifetime follows the token TTL
    pub fn cookie_policy(&self, kind: TokenKind) -> CookiePolicy {
        CookiePolicy {
            http_only: true,
            secure: self.cookie_secure,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_millis: i64::try_from(self.token_ttl(kind).as_millis()).unwrap_or(i64::MAX),
        }
    }
}

fn read_ttl(name: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    let ttl = parse_duration(raw).map_err(|source| ConfigError::InvalidTtl { name, source })?;
    if ttl.is_zero() {
        return Err(ConfigError::ZeroTtl(name));
    }
    Ok(ttl)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cr3t")])).unwrap();

        assert_eq!(config.jwt_secret, b"s3cr3t");
        assert_eq!(config.access_token_ttl, Duration::from_secs(3600));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(7 * 86_400));
        assert_eq!(config.password_hasher, PasswordHasher::default());
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::None);
    }

    #[test]
    fn test_missing_secret() {
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingSecret)
        ));
        assert!(matches!(
            AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "  ")])),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn test_overrides() {
        let config = AuthConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cr3t"),
            ("ACCESS_TOKEN_TTL", "15m"),
            ("REFRESH_TOKEN_TTL", "30d"),
            ("HASH_WORK_FACTOR", "10"),
            ("COOKIE_SECURE", "false"),
            ("COOKIE_SAME_SITE", "lax"),
        ]))
        .unwrap();

        assert_eq!(config.access_token_ttl, Duration::from_secs(900));
        assert_eq!(config.refresh_token_ttl, Duration::from_secs(30 * 86_400));
        assert_eq!(config.password_hasher.work_factor(), 10);
        assert!(!config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            ("ACCESS_TOKEN_TTL", "soon"),
            ("REFRESH_TOKEN_TTL", "0s"),
            ("HASH_WORK_FACTOR", "40"),
            ("HASH_WORK_FACTOR", "ten"),
            ("COOKIE_SECURE", "maybe"),
            ("COOKIE_SAME_SITE", "sometimes"),
        ] {
            let result = AuthConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cr3t"), (key, value)]));
            assert!(result.is_err(), "{key}={value} should be rejected");
        }
    }

    #[test]
    fn test_cookie_policy_follows_ttl() {
        let config = AuthConfig {
            access_token_ttl: Duration::from_secs(60),
            ..AuthConfig::development()
        };

        let access = config.cookie_policy(TokenKind::Access);
        assert!(access.http_only);
        assert_eq!(access.max_age_millis, 60_000);
        assert_eq!(access.path, "/");

        let refresh = config.cookie_policy(TokenKind::Refresh);
        assert_eq!(refresh.max_age_secs(), 7 * 86_400);
    }

    #[test]
    fn test_development_secret_is_random() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.jwt_secret.len(), DEV_SECRET_LEN);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }
}
