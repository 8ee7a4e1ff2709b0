//! Request handlers.
//!
//! Each submodule holds the async handler functions for one resource.
//! Handlers delegate to the repositories in `roombook_db` and map errors
//! via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod booking;
pub mod dashboard;
pub mod equipment;
pub mod notification;
pub mod review;
pub mod room;
