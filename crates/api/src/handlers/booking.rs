//! Handlers for the `/bookings` resource.
//!
//! Any authenticated user may submit bookings. Only the owner may edit or
//! cancel, and only while the booking is still pending. Staff may read any
//! booking.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use roombook_core::booking::{validate_transition, BookingStatus};
use roombook_core::error::CoreError;
use roombook_core::roles::can_view_booking;
use roombook_core::types::DbId;
use roombook_db::models::booking::{Booking, BookingDetail, BookingInput};
use roombook_db::repositories::BookingRepo;

use crate::conflict::validate_booking;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/bookings
///
/// Submit a booking request. It is stored as `pending` if the room is free.
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(mut input): AppJson<BookingInput>,
) -> AppResult<(StatusCode, Json<DataResponse<BookingDetail>>)> {
    let room = validate_booking(&state.pool, &mut input, None).await?;

    let booking = BookingRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        booking_id = booking.id,
        user_id = auth.user_id,
        room_id = room.id,
        start_time = %booking.start_time,
        end_time = %booking.end_time,
        "Booking submitted",
    );

    let detail = load_detail(&state, booking.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/bookings
///
/// The caller's own bookings, most recent first.
pub async fn list_mine(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingDetail>>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<BookingDetail>>> {
    let detail = load_detail(&state, id).await?;

    if !can_view_booking(&auth.role, auth.user_id, detail.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this booking".into(),
        )));
    }

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/bookings/{id}
///
/// Replace a pending booking's room, times, purpose and equipment. The
/// conflict check ignores the booking's own current slot.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(mut input): AppJson<BookingInput>,
) -> AppResult<Json<DataResponse<BookingDetail>>> {
    let booking = find_owned(&state, &auth, id).await?;

    if booking.status() != Some(BookingStatus::Pending) {
        return Err(AppError::Core(CoreError::Conflict(
            "Only pending bookings can be edited".into(),
        )));
    }

    validate_booking(&state.pool, &mut input, Some(id)).await?;

    BookingRepo::update_pending(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Only pending bookings can be edited".into(),
            ))
        })?;

    tracing::info!(booking_id = id, user_id = auth.user_id, "Booking edited");

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// POST /api/v1/bookings/{id}/cancel
///
/// Withdraw a pending booking. The row is kept with status `cancelled`.
pub async fn cancel(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<BookingDetail>>> {
    let booking = find_owned(&state, &auth, id).await?;
    let current = current_status(&booking)?;

    validate_transition(current, BookingStatus::Cancelled)?;

    BookingRepo::transition(&state.pool, id, current, BookingStatus::Cancelled)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Booking status changed; reload and try again".into(),
            ))
        })?;

    tracing::info!(booking_id = id, user_id = auth.user_id, "Booking cancelled");

    let detail = load_detail(&state, id).await?;
    Ok(Json(DataResponse { data: detail }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_detail(state: &AppState, id: DbId) -> AppResult<BookingDetail> {
    BookingRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))
}

/// Load a booking and verify the caller owns it.
///
/// Staff are not exempt: edits and cancellations belong to the requester.
async fn find_owned(state: &AppState, auth: &AuthUser, id: DbId) -> AppResult<Booking> {
    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))?;

    if booking.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only change your own bookings".into(),
        )));
    }
    Ok(booking)
}

pub(crate) fn current_status(booking: &Booking) -> AppResult<BookingStatus> {
    booking.status().ok_or_else(|| {
        AppError::InternalError(format!(
            "Booking {} has unknown status id {}",
            booking.id, booking.status_id
        ))
    })
}
