//! Platform Crate - Technical Infrastructure
//!
//! Domain-agnostic building blocks used by the auth crate:
//! - Authorization header parsing (`scheme token`, Basic credentials)
//! - Password / secret hashing (Argon2id with a configurable work factor)
//! - Cookie policy and `Set-Cookie` construction
//! - Human-readable duration strings (`"3600s"`, `"7D"`)
//! - Random bytes and Base64 helpers

pub mod authorization;
pub mod cookie;
pub mod crypto;
pub mod duration;
pub mod password;
