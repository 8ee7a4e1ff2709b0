//! Booking status constants and state machine.
//!
//! Status IDs match the `booking_statuses` seed data (1-based SMALLSERIAL).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::StatusId;

/// Maximum length of a booking's purpose text (matches `VARCHAR(255)`).
pub const MAX_PURPOSE_LEN: usize = 255;

/// Booking lifecycle status.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending = 1,
    Approved = 2,
    Rejected = 3,
    Cancelled = 4,
    Completed = 5,
}

/// Statuses that occupy a room for overlap purposes.
///
/// A pending request holds its slot as firmly as an approved one, so two
/// students can never both be waiting on the same room and time.
pub const BLOCKING_STATUSES: &[BookingStatus] = &[BookingStatus::Pending, BookingStatus::Approved];

/// Statuses shown in the staff history list.
pub const HISTORY_STATUSES: &[BookingStatus] = &[
    BookingStatus::Rejected,
    BookingStatus::Cancelled,
    BookingStatus::Completed,
];

/// Statuses a staff member may move a pending booking into.
pub const REVIEW_DECISIONS: &[BookingStatus] = &[BookingStatus::Approved, BookingStatus::Rejected];

impl BookingStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Approved),
            3 => Some(Self::Rejected),
            4 => Some(Self::Cancelled),
            5 => Some(Self::Completed),
            _ => None,
        }
    }

    /// Lowercase name, as stored in `booking_statuses.name`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Parse a lowercase status name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BookingStatus> for StatusId {
    fn from(value: BookingStatus) -> Self {
        value as StatusId
    }
}

/// Convert a slice of statuses into their database IDs for `= ANY($n)` binds.
pub fn status_ids(statuses: &[BookingStatus]) -> Vec<StatusId> {
    statuses.iter().map(|s| s.id()).collect()
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Returns the set of statuses reachable from `from`.
pub fn valid_transitions(from: BookingStatus) -> &'static [BookingStatus] {
    match from {
        BookingStatus::Pending => &[
            BookingStatus::Approved,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ],
        BookingStatus::Approved => &[BookingStatus::Completed],
        BookingStatus::Rejected | BookingStatus::Cancelled | BookingStatus::Completed => &[],
    }
}

pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a transition, returning a conflict error naming both ends.
pub fn validate_transition(from: BookingStatus, to: BookingStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Booking cannot move from {from} to {to}"
        )))
    }
}

/// Parse the target of a staff review decision.
///
/// Only `approved` and `rejected` are accepted.
pub fn parse_review_decision(raw: &str) -> Result<BookingStatus, CoreError> {
    match BookingStatus::from_name(raw) {
        Some(status) if REVIEW_DECISIONS.contains(&status) => Ok(status),
        _ => Err(CoreError::Validation(format!(
            "Invalid status '{raw}'. Must be one of: approved, rejected"
        ))),
    }
}

/// Message delivered to a booking's owner after a staff decision.
pub fn decision_message(room_name: &str, status: BookingStatus) -> String {
    format!("Your booking for {room_name} has been {status}.")
}

/// Validate the free-text purpose of a booking.
pub fn validate_purpose(purpose: &str) -> Result<(), CoreError> {
    let trimmed = purpose.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Purpose must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_PURPOSE_LEN {
        return Err(CoreError::Validation(format!(
            "Purpose must be at most {MAX_PURPOSE_LEN} characters"
        )));
    }
    Ok(())
}
