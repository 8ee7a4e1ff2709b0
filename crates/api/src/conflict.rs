//! Booking conflict validation shared by create, edit and approval.
//!
//! The pure rules live in `roombook_core::schedule`; this module wires them
//! to the room catalogue and the overlap query in `BookingRepo`.

use roombook_core::booking::{validate_purpose, BLOCKING_STATUSES};
use roombook_core::error::CoreError;
use roombook_core::schedule::{conflict_error, validate_time_range};
use roombook_core::types::{DbId, Timestamp};
use roombook_db::models::booking::BookingInput;
use roombook_db::models::room::Room;
use roombook_db::repositories::{BookingRepo, EquipmentRepo, RoomRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};

/// Validate a submitted or edited booking end to end.
///
/// Order: time range, purpose, room, equipment, then overlap. Returns the
/// target room so callers can name it in responses or logs. `input` has its
/// equipment ids sorted and deduplicated in place.
pub async fn validate_booking(
    pool: &PgPool,
    input: &mut BookingInput,
    exclude_id: Option<DbId>,
) -> AppResult<Room> {
    validate_time_range(input.start_time, input.end_time)?;
    validate_purpose(&input.purpose)?;

    let room = load_bookable_room(pool, input.room_id).await?;

    input.equipment_ids.sort_unstable();
    input.equipment_ids.dedup();
    ensure_equipment_exists(pool, &input.equipment_ids).await?;

    ensure_slot_free(pool, &room, input.start_time, input.end_time, exclude_id).await?;
    Ok(room)
}

/// Fail with a conflict naming `room` if any blocking booking overlaps
/// `[start, end)`. `exclude_id` is skipped.
pub async fn ensure_slot_free(
    pool: &PgPool,
    room: &Room,
    start: Timestamp,
    end: Timestamp,
    exclude_id: Option<DbId>,
) -> AppResult<()> {
    validate_time_range(start, end)?;

    let clash =
        BookingRepo::find_conflict(pool, room.id, start, end, BLOCKING_STATUSES, exclude_id)
            .await?;

    if let Some(existing) = clash {
        tracing::debug!(
            room_id = room.id,
            conflicting_booking_id = existing.id,
            "Booking slot already taken",
        );
        return Err(conflict_error(&room.name).into());
    }
    Ok(())
}

async fn load_bookable_room(pool: &PgPool, room_id: DbId) -> AppResult<Room> {
    let room = RoomRepo::find_by_id(pool, room_id)
        .await?
        .ok_or_else(|| AppError::not_found("Room", room_id))?;

    if !room.is_active {
        return Err(CoreError::Validation(format!(
            "{} is not available for booking",
            room.name
        ))
        .into());
    }
    Ok(room)
}

async fn ensure_equipment_exists(pool: &PgPool, ids: &[DbId]) -> AppResult<()> {
    if ids.is_empty() {
        return Ok(());
    }
    let found = EquipmentRepo::count_existing(pool, ids).await?;
    if found != ids.len() as i64 {
        return Err(CoreError::Validation("Unknown equipment selected".into()).into());
    }
    Ok(())
}
