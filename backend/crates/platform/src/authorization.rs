//! Authorization Header Parsing
//!
//! Splits `Authorization: <scheme> <token>` values and decodes the Basic
//! scheme's `base64(user:password)` payload.

use axum::http::{HeaderMap, header};
use thiserror::Error;

use crate::crypto::from_base64;
use crate::password::ClearTextPassword;

/// Authorization header parse failures (all client errors)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationHeaderError {
    #[error("Invalid Authorization header format")]
    MalformedHeader,

    #[error("Unsupported authentication scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid credentials encoding")]
    MalformedCredentials,
}

/// Credentials carried by a Basic authorization value
#[derive(Debug)]
pub struct BasicCredentials {
    pub user_id: String,
    pub password: ClearTextPassword,
}

/// Read the raw `Authorization` header value
pub fn authorization_value(headers: &HeaderMap) -> Result<&str, AuthorizationHeaderError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthorizationHeaderError::MalformedHeader)
}

/// Split `"<scheme> <token>"` on a single space
///
/// Exactly two non-empty space-separated fields are required.
pub fn extract_scheme(header: &str) -> Result<(&str, &str), AuthorizationHeaderError> {
    let mut fields = header.split(' ');

    match (fields.next(), fields.next(), fields.next()) {
        (Some(scheme), Some(token), None) if !scheme.is_empty() && !token.is_empty() => {
            Ok((scheme, token))
        }
        _ => Err(AuthorizationHeaderError::MalformedHeader),
    }
}

/// Return the token if the header uses `expected` (case-insensitive)
pub fn require_scheme<'a>(
    header: &'a str,
    expected: &str,
) -> Result<&'a str, AuthorizationHeaderError> {
    let (scheme, token) = extract_scheme(header)?;

    if !scheme.eq_ignore_ascii_case(expected) {
        return Err(AuthorizationHeaderError::UnsupportedScheme(scheme.to_string()));
    }

    Ok(token)
}

/// Decode a Basic token into credentials
///
/// Splits once on the first colon, so passwords may contain colons.
/// Either side being empty after trimming is rejected.
pub fn decode_basic(token: &str) -> Result<BasicCredentials, AuthorizationHeaderError> {
    let bytes = from_base64(token).map_err(|_| AuthorizationHeaderError::MalformedCredentials)?;
    let decoded =
        String::from_utf8(bytes).map_err(|_| AuthorizationHeaderError::MalformedCredentials)?;

    let (user_id, password) = decoded
        .split_once(':')
        .ok_or(AuthorizationHeaderError::MalformedCredentials)?;

    let user_id = user_id.trim();
    let password = ClearTextPassword::from_input(password.to_string());

    if user_id.is_empty() || password.is_blank() {
        return Err(AuthorizationHeaderError::MalformedCredentials);
    }

    Ok(BasicCredentials {
        user_id: user_id.to_string(),
        password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::to_base64;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_scheme() {
        assert_eq!(extract_scheme("Basic abc123"), Ok(("Basic", "abc123")));
        assert_eq!(extract_scheme("Bearer !@#$#abcd"), Ok(("Bearer", "!@#$#abcd")));
    }

    #[test]
    fn test_extract_scheme_field_count() {
        for header in ["", "Basic", "Basic abc def", "Basic  abc", " Basic", "Basic "] {
            assert_eq!(
                extract_scheme(header),
                Err(AuthorizationHeaderError::MalformedHeader),
                "{header:?} should be malformed"
            );
        }
    }

    #[test]
    fn test_require_scheme_is_case_insensitive() {
        for scheme in ["Basic", "basic", "BASIC"] {
            let header = format!("{scheme} token");
            assert_eq!(require_scheme(&header, "basic"), Ok("token"));
        }
    }

    #[test]
    fn test_require_scheme_rejects_other_schemes() {
        assert_eq!(
            require_scheme("Bearer token", "basic"),
            Err(AuthorizationHeaderError::UnsupportedScheme("Bearer".to_string()))
        );
        assert_eq!(
            require_scheme("Basic a b", "basic"),
            Err(AuthorizationHeaderError::MalformedHeader)
        );
    }

    #[test]
    fn test_decode_basic() {
        let credentials = decode_basic(&to_base64(b"user@test.com:pw123")).unwrap();
        assert_eq!(credentials.user_id, "user@test.com");
        assert_eq!(credentials.password.as_bytes(), b"pw123");
    }

    #[test]
    fn test_decode_basic_without_padding() {
        let padded = to_base64(b"user@test.com:pw123");
        let credentials = decode_basic(padded.trim_end_matches('=')).unwrap();
        assert_eq!(credentials.user_id, "user@test.com");
        assert_eq!(credentials.password.as_bytes(), b"pw123");
    }

    #[test]
    fn test_decode_basic_splits_on_first_colon() {
        let credentials = decode_basic(&to_base64(b"user@test.com:pa:ss")).unwrap();
        assert_eq!(credentials.user_id, "user@test.com");
        assert_eq!(credentials.password.as_bytes(), b"pa:ss");
    }

    #[test]
    fn test_decode_basic_rejects_malformed() {
        for raw in ["nocolon", ":pw", "user@test.com:", "user@test.com:   ", "  :pw"] {
            assert!(
                matches!(
                    decode_basic(&to_base64(raw.as_bytes())),
                    Err(AuthorizationHeaderError::MalformedCredentials)
                ),
                "{raw:?} should be rejected"
            );
        }
        assert!(matches!(
            decode_basic("%%%not-base64%%%"),
            Err(AuthorizationHeaderError::MalformedCredentials)
        ));
        assert!(matches!(
            decode_basic(&to_base64(&[0xff, 0xfe, b':', b'x'])),
            Err(AuthorizationHeaderError::MalformedCredentials)
        ));
    }

    #[test]
    fn test_authorization_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            authorization_value(&headers),
            Err(AuthorizationHeaderError::MalformedHeader)
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(authorization_value(&headers), Ok("Basic abc"));
    }
}
