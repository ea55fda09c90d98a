//! Error types for timetable generation.

use thiserror::Error;

/// Result type for timetable operations.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Errors that can occur during timetable generation.
///
/// A shortage of teachers is not an error; it is absorbed by the
/// round-robin fallback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimetableError {
    /// The roster or class list is empty or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TimetableError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
