//! Error types for weeksched

use thiserror::Error;

/// Result type for weeksched operations
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that can occur when building or querying a weekly schedule
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Malformed day key, interval, grid, shift or query input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Timezone identifier not found in the IANA database
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Configuration file missing, unreadable or unparsable
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScheduleError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ScheduleError::InvalidArgument(message.into())
    }

    /// Returns true for input validation failures.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ScheduleError::InvalidArgument(_))
    }

    /// Returns true for timezone resolution failures.
    pub fn is_unknown_timezone(&self) -> bool {
        matches!(self, ScheduleError::UnknownTimezone(_))
    }
}
