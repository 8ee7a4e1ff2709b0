//! Room entity model and DTOs.

use roombook_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a room.
#[derive(Debug, Deserialize)]
pub struct CreateRoom {
    pub name: String,
    pub room_type: String,
    pub capacity: i32,
    pub is_active: Option<bool>,
}

/// DTO for updating a room. All fields are optional.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateRoom {
    pub name: Option<String>,
    pub room_type: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}
