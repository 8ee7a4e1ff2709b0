pub mod admin;
pub mod auth;
pub mod booking;
pub mod catalogue;
pub mod dashboard;
pub mod health;
pub mod notification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     signup (public)
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user (requires auth)
///
/// /dashboard                                       own bookings + recent notifications
///
/// /bookings                                        list own, create
/// /bookings/{id}                                   get, edit (owner, pending)
/// /bookings/{id}/cancel                            cancel (owner, pending)
///
/// /rooms                                           list
/// /rooms/{id}                                      get
/// /equipment                                       list
///
/// /notifications                                   list, clear all
/// /notifications/unread-count                      unread count
/// /notifications/read-all                          mark all read
/// /notifications/{id}/read                         mark one read
///
/// /admin/bookings                                  review overview (staff only)
/// /admin/bookings/pending                          pending queue
/// /admin/bookings/approved                         approved queue
/// /admin/bookings/history                          rejected/cancelled/completed
/// /admin/bookings/{id}/status/{new_status}         approve or reject
/// /admin/rooms                                     create room
/// /admin/rooms/{id}                                update room
/// /admin/equipment                                 create equipment
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/bookings", booking::router())
        .merge(catalogue::router())
        .nest("/notifications", notification::router())
        .nest("/admin", admin::router())
}
