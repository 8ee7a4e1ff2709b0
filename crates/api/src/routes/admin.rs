//! Staff-only routes mounted at `/admin`.
//!
//! Access is enforced by the `RequireStaff` extractor in each handler.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{equipment, review, room};
use crate::state::AppState;

/// ```text
/// GET  /bookings                            -> review::overview
/// GET  /bookings/pending                    -> review::list_pending
/// GET  /bookings/approved                   -> review::list_approved
/// GET  /bookings/history                    -> review::list_history
/// POST /bookings/{id}/status/{new_status}   -> review::set_status
///
/// POST /rooms                               -> room::create
/// PUT  /rooms/{id}                          -> room::update
/// POST /equipment                           -> equipment::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(review::overview))
        .route("/bookings/pending", get(review::list_pending))
        .route("/bookings/approved", get(review::list_approved))
        .route("/bookings/history", get(review::list_history))
        .route(
            "/bookings/{id}/status/{new_status}",
            post(review::set_status),
        )
        .route("/rooms", post(room::create))
        .route("/rooms/{id}", put(room::update))
        .route("/equipment", post(equipment::create))
}
