//! Error types for roster parsing and validation.

use thiserror::Error;

/// Errors that can occur when parsing or validating roster records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RosterError {
    /// A label was empty or whitespace only.
    #[error("{kind} cannot be empty")]
    EmptyLabel { kind: &'static str },

    /// The PRN is not exactly ten decimal digits.
    #[error("PRN must be exactly 10 digits, got '{0}'")]
    InvalidPrn(String),

    /// The CGPA is outside 0-10 or not a finite number.
    #[error("CGPA must be between 0 and 10, got {0}")]
    InvalidCgpa(f64),

    /// The submission does not carry the expected number of preferences.
    #[error("expected {expected} preferences, got {actual}")]
    PreferenceCount { expected: usize, actual: usize },

    /// The same subject appears more than once in a submission.
    #[error("subject '{0}' is listed more than once")]
    DuplicateSubject(String),

    /// Preference ranks are not exactly 1 through 5.
    #[error("preference ranks must be 1 through {max} with no repeats, got {ranks:?}")]
    InvalidRanks { max: usize, ranks: Vec<u8> },

    /// The subject is not offered in the elective catalog.
    #[error("subject '{0}' is not in the elective catalog")]
    UnknownSubject(String),
}

impl RosterError {
    /// Returns true if this error concerns the shape of a preference list.
    pub fn is_preference_error(&self) -> bool {
        matches!(
            self,
            RosterError::PreferenceCount { .. }
                | RosterError::DuplicateSubject(_)
                | RosterError::InvalidRanks { .. }
        )
    }
}
