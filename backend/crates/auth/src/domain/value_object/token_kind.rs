//! Token Kind
//!
//! Discriminates access tokens from refresh tokens. Serialized into the
//! `type` claim, so the string forms are part of the token format.

use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[display("access")]
    Access,
    #[display("refresh")]
    Refresh,
}
