//! The signed-in user's landing page data.

use axum::extract::State;
use axum::Json;
use roombook_db::models::booking::BookingDetail;
use roombook_db::models::notification::Notification;
use roombook_db::repositories::{BookingRepo, NotificationRepo};
use serde::Serialize;

use crate::background::booking_sweep::sweep_expired;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Number of notifications shown on the dashboard.
const RECENT_NOTIFICATIONS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub bookings: Vec<BookingDetail>,
    pub notifications: Vec<Notification>,
    pub unread_count: i64,
}

/// GET /api/v1/dashboard
///
/// Completes expired bookings first so the caller never sees a finished
/// booking still marked approved.
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Dashboard>>> {
    sweep_expired(&state.pool).await?;

    let bookings = BookingRepo::list_for_user(&state.pool, auth.user_id).await?;
    let notifications = NotificationRepo::list_for_user(
        &state.pool,
        auth.user_id,
        false,
        RECENT_NOTIFICATIONS,
        0,
    )
    .await?;
    let unread_count = NotificationRepo::unread_count(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: Dashboard {
            bookings,
            notifications,
            unread_count,
        },
    }))
}
