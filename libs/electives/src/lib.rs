//! Elective seat allocation.
//!
//! Students are served strictly by merit: the highest CGPA chooses first and
//! takes the best-ranked subject that still has a seat. Key concepts:
//!
//! - **Capacity**: the same seat limit applies to every subject, globally
//!   across classes.
//! - **Unallocated**: a student whose five choices are all full still gets a
//!   record, with the `unallocated` sentinel and no rank.
//! - **Guard**: once a student holds a real allocation, their submission can
//!   no longer be replaced.
//!
//! # Invariants
//!
//! - One allocation per submission, never more, never fewer
//! - No subject exceeds its capacity
//! - Equal CGPAs keep their submission order
//! - A run is a full replacement; nothing is merged with earlier runs

mod engine;
mod error;
mod guard;
mod ledger;

pub use engine::{allocate, AllocationRun, AllocationSummary, DEFAULT_SUBJECT_CAPACITY};
pub use error::{AllocationError, AllocationResult};
pub use guard::{can_modify, ensure_modifiable};
pub use ledger::{StudentStatus, SubmissionLedger, SubmitOutcome};
