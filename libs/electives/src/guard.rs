//! The submission-update guard.
//!
//! The engine never consults this; callers check it before accepting a new
//! or replacement submission.

use campus_roster::{AllocatedSubject, Allocation};

use crate::error::{AllocationError, AllocationResult};

/// Returns false iff an allocation exists and holds a real subject.
pub fn can_modify(existing: Option<&Allocation>) -> bool {
    !existing.is_some_and(Allocation::is_allocated)
}

/// Like [`can_modify`], but reports the denial as an error naming the
/// allocated subject.
pub fn ensure_modifiable(existing: Option<&Allocation>) -> AllocationResult<()> {
    match existing {
        Some(Allocation {
            prn,
            allocated_subject: AllocatedSubject::Subject(subject),
            ..
        }) => Err(AllocationError::ModificationDenied {
            prn: prn.clone(),
            subject: subject.clone(),
        }),
        _ => Ok(()),
    }
}
