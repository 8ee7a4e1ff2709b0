//! Well-known role name constants and capability checks.
//!
//! These must match the seed data in `20260301000001_create_users_and_roles.sql`.

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_FACULTY: &str = "faculty";
pub const ROLE_ADMIN: &str = "admin";

/// Role assigned to every self-registered account.
pub const DEFAULT_SIGNUP_ROLE: &str = ROLE_STUDENT;

/// Whether the role may review bookings and manage the room catalogue.
///
/// Only `admin` counts as staff; `faculty` books rooms like a student.
pub fn is_staff(role: &str) -> bool {
    role == ROLE_ADMIN
}

/// Whether `role` may read or act on a booking owned by `owner_id`.
pub fn can_view_booking(role: &str, user_id: i64, owner_id: i64) -> bool {
    user_id == owner_id || is_staff(role)
}
