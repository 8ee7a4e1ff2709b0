//! Per-user profile (department) created at signup.

use roombook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `profiles` table. One-to-one with `users`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub user_id: DbId,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
