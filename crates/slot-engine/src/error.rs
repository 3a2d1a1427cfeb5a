//! Error types for slot-engine operations.
//!
//! Only fatal conditions live here. Malformed optional inputs (dates, numbers,
//! weekday lists, timezones) are recovered by [`crate::request::parse_or_default`]
//! and never reach this enum.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("at least one calendar identity is required")]
    MissingIdentity,

    #[error("increment must be a positive number of minutes, got {0}")]
    InvalidIncrement(i64),

    #[error("slot duration must be a positive number of minutes, got {0}")]
    InvalidDuration(i64),

    #[error("invalid work hours: start minute {start} must precede end minute {end} within a day")]
    InvalidWorkHours { start: u32, end: u32 },

    #[error("calendar store unavailable for '{identity}': {reason}")]
    CalendarStoreUnavailable { identity: String, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
