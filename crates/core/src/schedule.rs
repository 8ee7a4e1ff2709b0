//! Time-range rules for room bookings.
//!
//! Ranges are half-open: `[start, end)`. The end instant itself is free, so
//! a booking ending at 11:00 and one starting at 11:00 never collide. The
//! SQL filter in `BookingRepo::find_conflict` applies [`ranges_overlap`], and
//! the db crate's tests check the two agree.

use crate::error::CoreError;
use crate::types::Timestamp;

/// Reject ranges whose end is not strictly after their start.
pub fn validate_time_range(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(
            "End time must be after start time".into(),
        ));
    }
    Ok(())
}

/// `[s1, e1)` and `[s2, e2)` intersect iff `s1 < e2 && s2 < e1`.
pub fn ranges_overlap(s1: Timestamp, e1: Timestamp, s2: Timestamp, e2: Timestamp) -> bool {
    s1 < e2 && s2 < e1
}

/// The error reported when a room is already taken.
pub fn conflict_error(room_name: &str) -> CoreError {
    CoreError::Conflict(format!("{room_name} is already booked for this time slot"))
}
