//! Entity Module

pub mod account;
pub mod identity;
pub mod profile;
