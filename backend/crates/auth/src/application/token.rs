//! Token Signer
//!
//! HS256 JWTs carrying `{ sub, type, iat, exp }`. One secret signs both
//! kinds; the `type` claim is what tells an access token from a refresh
//! token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::value_object::token_kind::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Bad signature, malformed token or missing claims
    #[error("invalid token")]
    Invalid,

    #[error("token expired")]
    Expired,

    #[error("token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: UserId,
    #[serde(rename = "type")]
    kind: TokenKind,
    iat: i64,
    exp: i64,
}

/// Verified contents of a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPayload {
    pub subject: UserId,
    pub kind: TokenKind,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for `subject` that expires `ttl` from now
    pub fn sign(
        &self,
        subject: &UserId,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let ttl =
            chrono::Duration::from_std(ttl).map_err(|e| TokenError::Signing(e.to_string()))?;
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing("token lifetime out of range".into()))?;

        let claims = Claims {
            sub: *subject,
            kind,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Check signature and expiry and return the claims
    ///
    /// Expiry is exact: no clock-skew leeway.
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })?;
        let claims = data.claims;

        Ok(TokenPayload {
            subject: claims.sub,
            kind: claims.kind,
            issued_at: DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::Invalid)?,
            expires_at: DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::{from_base64, to_base64};
    use platform::duration::parse_duration;

    const SECRET: &[u8] = b"test-secret-with-enough-entropy!";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET)
    }

    #[test]
    fn test_sign_and_verify() {
        let subject = UserId::new();
        let token = signer()
            .sign(&subject, TokenKind::Access, Duration::from_secs(3600))
            .unwrap();

        let payload = signer().verify(&token).unwrap();
        assert_eq!(payload.subject, subject);
        assert_eq!(payload.kind, TokenKind::Access);
        assert_eq!(
            (payload.expires_at - payload.issued_at).num_seconds(),
            3600
        );
    }

    #[test]
    fn test_claim_names() {
        let token = signer()
            .sign(&UserId::new(), TokenKind::Refresh, Duration::from_secs(60))
            .unwrap();
        let payload = token.split('.').nth(1).unwrap();
        let claims: serde_json::Value =
            serde_json::from_slice(&base64_url_decode(payload)).unwrap();

        assert_eq!(claims["type"], "refresh");
        assert!(claims["sub"].is_string());
        assert!(claims["iat"].is_i64());
        assert!(claims["exp"].is_i64());
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = signer()
            .sign(&UserId::new(), TokenKind::Access, Duration::from_secs(60))
            .unwrap();

        let other = TokenSigner::new(b"another-secret");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_is_invalid() {
        for token in ["", "abc", "a.b.c", "header.payload"] {
            assert_eq!(signer().verify(token), Err(TokenError::Invalid), "{token:?}");
        }
    }

    #[test]
    fn test_tampered_payload_is_invalid() {
        let token = signer()
            .sign(&UserId::new(), TokenKind::Refresh, Duration::from_secs(60))
            .unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = serde_json::json!({
            "sub": UserId::new(),
            "type": "access",
            "iat": 0,
            "exp": i64::MAX / 1000,
        });
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            base64_url_encode(forged_claims.to_string().as_bytes()),
            parts[2]
        );

        assert_eq!(signer().verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired() {
        let token = signer()
            .sign(&UserId::new(), TokenKind::Access, Duration::ZERO)
            .unwrap();
        std::thread::sleep(Duration::from_millis(1100));

        assert_eq!(signer().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_duration_string_ttl() {
        let subject = UserId::new();
        let ttl = parse_duration("1s").unwrap();
        let token = signer().sign(&subject, TokenKind::Access, ttl).unwrap();

        assert_eq!(signer().verify(&token).unwrap().subject, subject);

        std::thread::sleep(Duration::from_secs(2));
        assert_eq!(signer().verify(&token), Err(TokenError::Expired));
    }

    // JWT segments are unpadded base64url
    fn base64_url_decode(segment: &str) -> Vec<u8> {
        let mut standard = segment.replace('-', "+").replace('_', "/");
        while standard.len() % 4 != 0 {
            standard.push('=');
        }
        from_base64(&standard).unwrap()
    }

    fn base64_url_encode(bytes: &[u8]) -> String {
        to_base64(bytes)
            .trim_end_matches('=')
            .replace('+', "-")
            .replace('/', "_")
    }
}
