//! Booking entity models and DTOs.

use roombook_core::booking::BookingStatus;
use roombook_core::types::{DbId, StatusId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub room_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Decode `status_id`; `None` only if the lookup table drifted.
    pub fn status(&self) -> Option<BookingStatus> {
        BookingStatus::from_id(self.status_id)
    }
}

/// A booking joined with its owner, room, status name and equipment.
///
/// This is the shape returned by every listing endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BookingDetail {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub room_id: DbId,
    pub room_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    pub status_id: StatusId,
    pub status: String,
    pub equipment_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or editing a booking.
///
/// Edits replace every field, including the equipment list.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingInput {
    pub room_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub purpose: String,
    #[serde(default)]
    pub equipment_ids: Vec<DbId>,
}
