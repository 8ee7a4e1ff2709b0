//! Account rows and their public projection.

use roombook_core::roles;
use roombook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A user joined with its role name and (optional) profile department.
///
/// Carries the password hash, so it is never serialized; handlers answer
/// with [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub is_active: bool,
    /// Must match the `ver` claim of an access token for it to be accepted.
    pub token_version: i32,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    pub fn is_staff(&self) -> bool {
        roles::is_staff(&self.role)
    }

    /// Whether a login lock is still in force at `now`.
    pub fn is_locked_at(&self, now: Timestamp) -> bool {
        self.locked_until.is_some_and(|until| until > now)
    }
}

/// What `/auth/me` and the login payload expose about an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_staff: bool,
    pub department: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            is_staff: user.is_staff(),
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            department: user.department,
            created_at: user.created_at,
        }
    }
}

/// Insert payload; the role is given by name and resolved in SQL.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
