//! # campus-roster
//!
//! Plain records shared by the timetable and elective engines.
//!
//! ## Design Principles
//!
//! - Labels (teacher names, class identifiers, subjects) are never empty
//! - Student identifiers (PRNs) are validated once, at the boundary
//! - Engines consume these records read-only and hand back new ones
//! - Every record round-trips through serde for the caller's storage
//!
//! ## Label Format
//!
//! Labels are trimmed, non-empty strings wrapped in a dedicated type so a
//! class identifier can never be passed where a teacher name is expected:
//!
//! - `TeacherName("Dr. Rao")`
//! - `ClassId("CSE-A")`
//! - `SubjectName("Cloud Computing")`

mod catalog;
mod error;
mod macros;
mod records;
mod types;

pub use catalog::{ElectiveCatalog, DEFAULT_ELECTIVES};
pub use error::RosterError;
pub use records::*;
pub use types::*;

/// Number of ranked preferences every submission carries.
pub const PREFERENCE_COUNT: usize = 5;
