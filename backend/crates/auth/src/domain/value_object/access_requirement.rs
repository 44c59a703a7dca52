//! Access Requirement
//!
//! What a route demands before its handler runs.

use derive_more::Display;

use super::token_kind::TokenKind;

/// Per-route authentication requirement
///
/// Routes without an explicit entry require a valid access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum AccessRequirement {
    /// No token inspected
    #[display("public")]
    Public,
    /// Valid access token in the access cookie
    #[default]
    #[display("access")]
    Access,
    /// Valid refresh token in the refresh cookie
    #[display("refresh")]
    Refresh,
}

impl AccessRequirement {
    /// Kind of token the gate must find, `None` for public routes
    pub fn token_kind(self) -> Option<TokenKind> {
        match self {
            AccessRequirement::Public => None,
            AccessRequirement::Access => Some(TokenKind::Access),
            AccessRequirement::Refresh => Some(TokenKind::Refresh),
        }
    }
}
