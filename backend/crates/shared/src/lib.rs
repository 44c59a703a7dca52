//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - The unified [`error::app_error::AppError`] and its HTTP classification
//! - Typed entity identifiers
//!
//! Anything placed here must mean the same thing in every domain that
//! depends on it.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
