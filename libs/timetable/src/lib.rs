//! Weekly timetable generation.
//!
//! Every class gets a full week: five days of six periods, one teacher and
//! subject per period. Key concepts:
//!
//! - **Busy set**: which teacher is already teaching at a (day, period).
//!   It lives for one run and is shared by every class in that run.
//! - **Preferred teacher**: the first teacher in roster order who is free
//!   at the current (day, period).
//! - **Fallback**: when nobody is free, the teacher at
//!   `period % roster_len` is used and may end up double-booked.
//!
//! # Invariants
//!
//! - Output is deterministic given the same roster and class order
//! - Every class receives exactly 5 × 6 entries
//! - With at least as many teachers as classes, no teacher is double-booked
//! - Inputs are never mutated; each run starts from an empty busy set

mod assigner;
mod error;
mod grid;
mod report;

pub use assigner::{generate_timetables, ClassTimetable, DaySchedule, ScheduleEntry};
pub use error::{TimetableError, TimetableResult};
pub use grid::{room_for, Day, Slot, DAYS, PERIODS_PER_DAY, PERIOD_LABELS};
pub use report::{find_class_timetable, find_conflicts, teacher_load, Conflict};
