//! Read-only views over generated timetables.

use std::collections::BTreeMap;

use campus_roster::{ClassId, TeacherName};
use serde::Serialize;

use crate::assigner::ClassTimetable;
use crate::grid::Day;

/// A teacher scheduled in more than one class at the same (day, period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub day: Day,
    pub period: usize,
    pub teacher: TeacherName,
    pub classes: Vec<ClassId>,
}

/// Find every double-booking in a set of timetables.
///
/// Conflicts are ordered by day, period, then teacher name; the classes of
/// each conflict keep timetable order.
pub fn find_conflicts(timetables: &[ClassTimetable]) -> Vec<Conflict> {
    let mut bookings: BTreeMap<(Day, usize, &TeacherName), Vec<&ClassId>> = BTreeMap::new();

    for timetable in timetables {
        for entry in timetable.entries() {
            bookings
                .entry((entry.slot.day, entry.slot.period, &entry.teacher))
                .or_default()
                .push(&timetable.class_id);
        }
    }

    bookings
        .into_iter()
        .filter(|(_, classes)| classes.len() > 1)
        .map(|((day, period, teacher), classes)| Conflict {
            day,
            period,
            teacher: teacher.clone(),
            classes: classes.into_iter().cloned().collect(),
        })
        .collect()
}

/// Number of periods each teacher teaches across all timetables.
pub fn teacher_load(timetables: &[ClassTimetable]) -> BTreeMap<TeacherName, usize> {
    let mut load = BTreeMap::new();
    for entry in timetables.iter().flat_map(ClassTimetable::entries) {
        *load.entry(entry.teacher.clone()).or_insert(0) += 1;
    }
    load
}

/// Look up the timetable for one class.
pub fn find_class_timetable<'a>(
    timetables: &'a [ClassTimetable],
    class_id: &str,
) -> Option<&'a ClassTimetable> {
    timetables.iter().find(|t| t.class_id.as_str() == class_id)
}
