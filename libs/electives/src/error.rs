//! Error types for elective allocation.

use campus_roster::{Prn, RosterError, SubjectName};
use thiserror::Error;

/// Result type for allocation operations.
pub type AllocationResult<T> = Result<T, AllocationError>;

/// Errors that can occur during allocation.
///
/// Running out of seats is not an error; those students are recorded as
/// unallocated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AllocationError {
    #[error("no submissions to allocate")]
    NoSubmissions,

    #[error("invalid submission for {prn}: {source}")]
    InvalidSubmission {
        prn: Prn,
        #[source]
        source: RosterError,
    },

    #[error("student {0} has more than one submission")]
    DuplicateSubmission(Prn),

    #[error("subject capacity must be at least 1, got {0}")]
    InvalidCapacity(u32),

    #[error("cannot modify preferences after allocation: {prn} is allocated to {subject}")]
    ModificationDenied { prn: Prn, subject: SubjectName },
}

impl AllocationError {
    /// Returns true if this error comes from the submission-update guard.
    pub fn is_modification_denied(&self) -> bool {
        matches!(self, AllocationError::ModificationDenied { .. })
    }
}
