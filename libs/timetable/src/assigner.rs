//! Greedy slot assignment across all classes of a run.

use std::collections::HashSet;

use campus_roster::{ClassId, ClassSection, SubjectName, Teacher, TeacherName};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{TimetableError, TimetableResult};
use crate::grid::{room_for, Day, Slot, DAYS, PERIOD_LABELS};

/// One taught period in a class timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    #[serde(flatten)]
    pub slot: Slot,
    pub subject: SubjectName,
    pub teacher: TeacherName,
    pub room: String,

    /// Set when no teacher was free and the round-robin teacher was used.
    /// Such entries may double-book the teacher.
    #[serde(default)]
    pub fallback: bool,
}

/// The periods of one class on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Day,
    pub periods: Vec<ScheduleEntry>,
}

/// A full week for one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassTimetable {
    pub class_id: ClassId,
    pub days: Vec<DaySchedule>,
}

impl ClassTimetable {
    /// Every entry of the week, Monday period 0 first.
    pub fn entries(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.days.iter().flat_map(|d| d.periods.iter())
    }

    /// Number of entries filled by the round-robin fallback.
    pub fn fallback_count(&self) -> usize {
        self.entries().filter(|e| e.fallback).count()
    }
}

/// Per-run assignment state.
///
/// The busy set is keyed by (teacher, day, period) and only ever records
/// conflict-free picks; fallback picks leave it untouched.
struct SlotAssigner<'a> {
    teachers: &'a [Teacher],
    busy: HashSet<(&'a str, Day, usize)>,
}

impl<'a> SlotAssigner<'a> {
    /// `teachers` must be non-empty.
    fn new(teachers: &'a [Teacher]) -> Self {
        Self {
            teachers,
            busy: HashSet::new(),
        }
    }

    /// Picks the teacher for (day, period). Returns the teacher and whether
    /// the fallback rule was used.
    fn pick(&mut self, day: Day, period: usize) -> (&'a Teacher, bool) {
        let teachers = self.teachers;
        for teacher in teachers {
            if self.busy.insert((teacher.name.as_str(), day, period)) {
                return (teacher, false);
            }
        }

        (&teachers[period % teachers.len()], true)
    }

    fn timetable_for(&mut self, class: &ClassSection) -> ClassTimetable {
        let mut days = Vec::with_capacity(DAYS.len());

        for day in DAYS {
            let mut periods = Vec::with_capacity(PERIOD_LABELS.len());

            for (period, time) in PERIOD_LABELS.iter().enumerate() {
                let (teacher, fallback) = self.pick(day, period);
                if fallback {
                    debug!(
                        class_id = %class.id,
                        day = %day,
                        period,
                        teacher = %teacher.name,
                        "No free teacher, using round-robin fallback"
                    );
                }

                periods.push(ScheduleEntry {
                    slot: Slot {
                        day,
                        period,
                        time: (*time).to_string(),
                    },
                    subject: teacher.subject.clone(),
                    teacher: teacher.name.clone(),
                    room: room_for(period),
                    fallback,
                });
            }

            days.push(DaySchedule { day, periods });
        }

        ClassTimetable {
            class_id: class.id.clone(),
            days,
        }
    }
}

/// Generate a weekly timetable for every class.
///
/// Classes are processed in input order, and within a class days and
/// periods in grid order. For each slot the first roster teacher not yet
/// busy at that (day, period) anywhere in the run is assigned. When all are
/// busy, the teacher at `period % teachers.len()` is assigned without being
/// marked busy, so every class always gets a complete week.
///
/// Fails with [`TimetableError::InvalidInput`] when either list is empty or
/// contains duplicate teacher names or class identifiers.
#[instrument(skip_all, fields(teachers = teachers.len(), classes = classes.len()))]
pub fn generate_timetables(
    teachers: &[Teacher],
    classes: &[ClassSection],
) -> TimetableResult<Vec<ClassTimetable>> {
    validate(teachers, classes)?;

    let mut assigner = SlotAssigner::new(teachers);
    let timetables: Vec<ClassTimetable> = classes
        .iter()
        .map(|class| assigner.timetable_for(class))
        .collect();

    let fallbacks: usize = timetables.iter().map(ClassTimetable::fallback_count).sum();
    if fallbacks > 0 {
        warn!(
            fallbacks,
            "Roster too small for conflict-free coverage; some teachers are double-booked"
        );
    }

    info!(
        timetables = timetables.len(),
        fallbacks, "Timetable generation complete"
    );

    Ok(timetables)
}

fn validate(teachers: &[Teacher], classes: &[ClassSection]) -> TimetableResult<()> {
    if teachers.is_empty() {
        return Err(TimetableError::invalid("at least one teacher is required"));
    }
    if classes.is_empty() {
        return Err(TimetableError::invalid("at least one class is required"));
    }

    let mut names = HashSet::new();
    for teacher in teachers {
        if !names.insert(teacher.name.as_str()) {
            return Err(TimetableError::invalid(format!(
                "teacher '{}' is listed more than once",
                teacher.name
            )));
        }
    }

    let mut ids = HashSet::new();
    for class in classes {
        if !ids.insert(class.id.as_str()) {
            return Err(TimetableError::invalid(format!(
                "class '{}' is listed more than once",
                class.id
            )));
        }
    }

    Ok(())
}
