//! Cookie Management Infrastructure
//!
//! Cookie policy and `Set-Cookie` header construction.

use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    /// Parse a configuration value (`strict`, `lax`, `none`, any case)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

/// Attributes applied to one issued cookie
///
/// `max_age_millis` is derived from a token TTL; the `Max-Age` attribute
/// itself is written in whole seconds as RFC 6265 requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookiePolicy {
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_millis: i64,
}

impl CookiePolicy {
    pub fn max_age_secs(&self) -> i64 {
        self.max_age_millis / 1000
    }

    /// Build a Set-Cookie header value
    pub fn build_set_cookie(&self, name: &str, value: &str) -> String {
        let mut cookie = format!("{}={}", name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Max-Age={}", self.max_age_secs()));

        cookie
    }

    pub fn set_cookie_header(
        &self,
        name: &str,
        value: &str,
    ) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(name, value))
    }
}
