//! Read-only catalogue routes (`/rooms`, `/equipment`).

use axum::routing::get;
use axum::Router;

use crate::handlers::{equipment, room};
use crate::state::AppState;

/// ```text
/// GET /rooms        -> room::list
/// GET /rooms/{id}   -> room::get_by_id
/// GET /equipment    -> equipment::list
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(room::list))
        .route("/rooms/{id}", get(room::get_by_id))
        .route("/equipment", get(equipment::list))
}
