//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Signing and verifying access tokens.

pub mod jwt;
pub mod password;
