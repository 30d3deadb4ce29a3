//! Reminder error types.

use thiserror::Error;

/// Errors that can occur while managing reminders.
#[derive(Debug, Error)]
pub enum ReminderError {
    /// Time of day could not be parsed or is out of range.
    #[error("invalid time of day: {0}")]
    InvalidTime(String),

    /// Weekday outside 0 (Sunday) ..= 6 (Saturday).
    #[error("invalid weekday: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    /// Reading or writing persisted state failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted state is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The notification facility rejected a request.
    #[error("scheduling failed: {0}")]
    Scheduling(String),
}

/// Result type for reminder operations.
pub type Result<T> = std::result::Result<T, ReminderError>;
