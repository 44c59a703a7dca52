//! Value Object Module

pub mod access_requirement;
pub mod email;
pub mod nickname;
pub mod refresh_token_hash;
pub mod token_kind;
pub mod user_password;
