//! Property tests for timetable generation.
//!
//! Rosters and class lists are generated with distinct labels so every
//! input is valid; the properties then hold for all of them:
//! 1. Coverage: one timetable per class, 5 days × 6 periods each
//! 2. No phantom teacher: every entry names a roster teacher and their subject
//! 3. Conflict bound: enough teachers means zero double-bookings
//! 4. Determinism: the same input produces the same output

use std::collections::HashMap;

use campus_roster::{ClassId, ClassSection, SubjectName, Teacher, TeacherName};
use campus_timetable::{
    find_conflicts, generate_timetables, DAYS, PERIODS_PER_DAY,
};
use proptest::prelude::*;

fn roster(size: usize) -> Vec<Teacher> {
    (0..size)
        .map(|i| {
            Teacher::new(
                TeacherName::new(format!("Teacher {i}")).unwrap(),
                SubjectName::new(format!("Subject {}", i % 4)).unwrap(),
            )
        })
        .collect()
}

fn class_list(size: usize) -> Vec<ClassSection> {
    (0..size)
        .map(|i| ClassSection::new(ClassId::new(format!("SEC-{i}")).unwrap()))
        .collect()
}

proptest! {
    #[test]
    fn every_class_gets_a_full_week(teachers in 1usize..8, classes in 1usize..8) {
        let timetables = generate_timetables(&roster(teachers), &class_list(classes)).unwrap();

        prop_assert_eq!(timetables.len(), classes);
        for timetable in &timetables {
            prop_assert_eq!(timetable.days.len(), DAYS.len());
            for (day, schedule) in DAYS.iter().zip(&timetable.days) {
                prop_assert_eq!(&schedule.day, day);
                prop_assert_eq!(schedule.periods.len(), PERIODS_PER_DAY);
            }
        }
    }

    #[test]
    fn entries_only_name_roster_teachers(teachers in 1usize..8, classes in 1usize..8) {
        let roster = roster(teachers);
        let subjects: HashMap<&str, &str> = roster
            .iter()
            .map(|t| (t.name.as_str(), t.subject.as_str()))
            .collect();

        let timetables = generate_timetables(&roster, &class_list(classes)).unwrap();
        for entry in timetables.iter().flat_map(|t| t.entries()) {
            let subject = subjects.get(entry.teacher.as_str());
            prop_assert_eq!(subject, Some(&entry.subject.as_str()));
        }
    }

    #[test]
    fn enough_teachers_means_no_conflicts(classes in 1usize..8, extra in 0usize..4) {
        let timetables =
            generate_timetables(&roster(classes + extra), &class_list(classes)).unwrap();

        prop_assert!(find_conflicts(&timetables).is_empty());
        prop_assert!(timetables.iter().all(|t| t.fallback_count() == 0));
    }

    #[test]
    fn generation_is_deterministic(teachers in 1usize..6, classes in 1usize..6) {
        let roster = roster(teachers);
        let classes = class_list(classes);

        let first = generate_timetables(&roster, &classes).unwrap();
        let second = generate_timetables(&roster, &classes).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn understaffed_conflicts_only_come_from_fallback() {
    let timetables = generate_timetables(&roster(2), &class_list(5)).unwrap();
    let conflicts = find_conflicts(&timetables);

    assert!(!conflicts.is_empty());
    for conflict in &conflicts {
        let fallback_classes = conflict
            .classes
            .iter()
            .filter(|id| {
                timetables
                    .iter()
                    .find(|t| &&t.class_id == id)
                    .and_then(|t| {
                        t.entries().find(|e| {
                            e.slot.day == conflict.day
                                && e.slot.period == conflict.period
                                && e.teacher == conflict.teacher
                        })
                    })
                    .is_some_and(|e| e.fallback)
            })
            .count();
        // Exactly one class holds the teacher through a free pick.
        assert_eq!(fallback_classes, conflict.classes.len() - 1);
    }
}
