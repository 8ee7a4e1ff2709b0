//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token.
//! - [`rbac::RequireStaff`] -- Requires a staff role (booking review, catalogue edits).

pub mod auth;
pub mod rbac;
