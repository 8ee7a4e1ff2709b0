//! Handlers for the room catalogue.
//!
//! Reads are open to any authenticated user; writes are staff only and
//! mounted under `/admin/rooms`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roombook_core::error::CoreError;
use roombook_core::types::DbId;
use roombook_db::models::room::{CreateRoom, Room, UpdateRoom};
use roombook_db::repositories::RoomRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/rooms
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IncludeInactiveParams>,
) -> AppResult<Json<DataResponse<Vec<Room>>>> {
    let include_inactive = params.include_inactive && auth.is_staff();
    let rooms = RoomRepo::list(&state.pool, include_inactive).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Room>>> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Room", id))?;
    Ok(Json(DataResponse { data: room }))
}

/// POST /api/v1/admin/rooms
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRoom>,
) -> AppResult<(StatusCode, Json<DataResponse<Room>>)> {
    validate_name(&input.name)?;
    validate_name(&input.room_type)?;
    validate_capacity(input.capacity)?;

    let room = RoomRepo::create(&state.pool, &input).await?;
    tracing::info!(
        room_id = room.id,
        created_by = staff.user_id,
        name = %room.name,
        "Room created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// PUT /api/v1/admin/rooms/{id}
///
/// Partial update; `is_active: false` takes the room out of the bookable
/// catalogue without touching existing bookings.
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateRoom>,
) -> AppResult<Json<DataResponse<Room>>> {
    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(room_type) = &input.room_type {
        validate_name(room_type)?;
    }
    if let Some(capacity) = input.capacity {
        validate_capacity(capacity)?;
    }

    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Room", id))?;
    tracing::info!(
        room_id = id,
        updated_by = staff.user_id,
        is_active = room.is_active,
        "Room updated"
    );
    Ok(Json(DataResponse { data: room }))
}

fn validate_name(value: &str) -> Result<(), CoreError> {
    let len = value.trim().chars().count();
    if len == 0 || len > 100 {
        return Err(CoreError::Validation(
            "Room name and type must be 1-100 characters".into(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity <= 0 {
        return Err(CoreError::Validation("Capacity must be positive".into()));
    }
    Ok(())
}
