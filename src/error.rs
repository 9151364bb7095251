//! Errors raised while building the shift generator and roster cursors
//!
//! Every variant is a construction-time failure: a generator, include
//! condition or schedule cursor is never handed out half-built.

use thiserror::Error;

/// Errors that can occur while validating shift configuration or roster data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShiftError {
    #[error("no handoff times provided")]
    NoHandoffTimes,

    #[error("handoff times must be sorted and unique, got {0:?}")]
    UnsortedHandoffTimes(Vec<String>),

    #[error("invalid handoff time {0:?}: expected HH:MM")]
    InvalidHandoffTime(String),

    #[error("invalid {field} value {value:?}: expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    #[error("{local} does not exist in time zone {zone}")]
    NonexistentLocalTime { local: String, zone: String },

    #[error("unknown time zone {0:?}")]
    InvalidTimeZone(String),

    #[error("invalid non-working day {0:?}: expected \"JP holidays\", a weekday such as \"Sat\", or a date such as \"Jan 2\"")]
    InvalidNonWorkingDay(String),

    #[error("invalid include condition {expr:?}: {reason}")]
    InvalidIncludeCondition { expr: String, reason: String },

    #[error("invalid schedule entry in {schedule:?}: {value:?} is not an RFC 3339 timestamp")]
    InvalidScheduleEntry { schedule: String, value: String },
}

/// Result type for shift construction
pub type Result<T> = std::result::Result<T, ShiftError>;
