//! Domain logic for the room booking service.
//!
//! This crate has no internal dependencies so both the repository layer and
//! the HTTP layer can share the same rules.

pub mod booking;
pub mod error;
pub mod roles;
pub mod schedule;
pub mod types;
