//! Staff review of booking requests (`/admin/bookings`).
//!
//! Every listing runs the completion sweep first so the approved queue never
//! shows a booking whose end time has already passed.

use axum::extract::State;
use axum::Json;
use roombook_core::booking::{
    decision_message, parse_review_decision, validate_transition, BookingStatus,
    HISTORY_STATUSES,
};
use roombook_core::error::CoreError;
use roombook_core::types::DbId;
use roombook_db::models::booking::BookingDetail;
use roombook_db::repositories::{BookingRepo, RoomRepo};
use serde::Serialize;

use crate::background::booking_sweep::sweep_expired;
use crate::conflict::ensure_slot_free;
use crate::error::{AppError, AppResult};
use crate::extract::AppPath;
use crate::handlers::booking::current_status;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// The three review queues, as shown on the staff overview.
#[derive(Debug, Serialize)]
pub struct ReviewOverview {
    pub pending: Vec<BookingDetail>,
    pub approved: Vec<BookingDetail>,
    pub history: Vec<BookingDetail>,
}

/// GET /api/v1/admin/bookings
pub async fn overview(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ReviewOverview>>> {
    sweep_expired(&state.pool).await?;

    let pending =
        BookingRepo::list_by_statuses(&state.pool, &[BookingStatus::Pending], true).await?;
    let approved =
        BookingRepo::list_by_statuses(&state.pool, &[BookingStatus::Approved], true).await?;
    let history = BookingRepo::list_by_statuses(&state.pool, HISTORY_STATUSES, false).await?;

    Ok(Json(DataResponse {
        data: ReviewOverview {
            pending,
            approved,
            history,
        },
    }))
}

/// GET /api/v1/admin/bookings/pending
pub async fn list_pending(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingDetail>>>> {
    list_after_sweep(&state, &[BookingStatus::Pending], true).await
}

/// GET /api/v1/admin/bookings/approved
pub async fn list_approved(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingDetail>>>> {
    list_after_sweep(&state, &[BookingStatus::Approved], true).await
}

/// GET /api/v1/admin/bookings/history
pub async fn list_history(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BookingDetail>>>> {
    list_after_sweep(&state, HISTORY_STATUSES, false).await
}

/// POST /api/v1/admin/bookings/{id}/status/{new_status}
///
/// Approve or reject a pending booking. The owner receives exactly one
/// notification, written in the same transaction as the status change.
/// Approval re-checks the slot so a request cannot be approved on top of
/// another one that now holds the room.
pub async fn set_status(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    AppPath((id, new_status)): AppPath<(DbId, String)>,
) -> AppResult<Json<DataResponse<BookingDetail>>> {
    let decision = parse_review_decision(&new_status)?;

    let booking = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))?;
    validate_transition(current_status(&booking)?, decision)?;

    let room = RoomRepo::find_by_id(&state.pool, booking.room_id)
        .await?
        .ok_or_else(|| AppError::not_found("Room", booking.room_id))?;

    if decision == BookingStatus::Approved {
        ensure_slot_free(
            &state.pool,
            &room,
            booking.start_time,
            booking.end_time,
            Some(booking.id),
        )
        .await?;
    }

    let message = decision_message(&room.name, decision);
    BookingRepo::decide(&state.pool, id, decision, &message)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Booking is no longer pending".into(),
            ))
        })?;

    tracing::info!(
        booking_id = id,
        reviewer_id = staff.user_id,
        owner_id = booking.user_id,
        decision = %decision,
        "Booking reviewed",
    );

    let detail = BookingRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Booking", id))?;
    Ok(Json(DataResponse { data: detail }))
}

async fn list_after_sweep(
    state: &AppState,
    statuses: &[BookingStatus],
    oldest_first: bool,
) -> AppResult<Json<DataResponse<Vec<BookingDetail>>>> {
    sweep_expired(&state.pool).await?;
    let bookings = BookingRepo::list_by_statuses(&state.pool, statuses, oldest_first).await?;
    Ok(Json(DataResponse { data: bookings }))
}
