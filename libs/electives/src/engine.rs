//! Single-pass, merit-first capacitated allocation.

use std::collections::{BTreeMap, HashSet};

use campus_roster::{Allocation, Prn, SubjectName, Submission};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{AllocationError, AllocationResult};

/// Seats per subject when the operator does not set one.
pub const DEFAULT_SUBJECT_CAPACITY: u32 = 60;

/// The output of one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRun {
    /// One record per submission, in merit order.
    pub allocations: Vec<Allocation>,

    /// Seats filled per subject, for every subject the scan reached. Each
    /// count is at least one; subjects nobody reached are absent.
    pub seats: BTreeMap<SubjectName, u32>,
}

impl AllocationRun {
    pub fn allocation_for(&self, prn: &Prn) -> Option<&Allocation> {
        self.allocations.iter().find(|a| &a.prn == prn)
    }

    pub fn summary(&self) -> AllocationSummary {
        let allocated = self.allocations.iter().filter(|a| a.is_allocated()).count();
        AllocationSummary {
            total_students: self.allocations.len(),
            allocated,
            not_allocated: self.allocations.len() - allocated,
            seats_by_subject: self.seats.clone(),
        }
    }
}

/// Headline numbers for an allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationSummary {
    pub total_students: usize,
    pub allocated: usize,
    pub not_allocated: usize,
    pub seats_by_subject: BTreeMap<SubjectName, u32>,
}

/// Allocate elective seats.
///
/// Submissions are ordered by CGPA, highest first, with a stable sort so
/// equal CGPAs keep their input order. Each student in turn receives the
/// best-ranked subject whose filled count is below `capacity`; a student
/// whose choices are all full is recorded as unallocated.
///
/// Every submission is validated first. Fails with
/// [`AllocationError::NoSubmissions`] on empty input,
/// [`AllocationError::InvalidCapacity`] when `capacity` is zero, and
/// [`AllocationError::InvalidSubmission`] or
/// [`AllocationError::DuplicateSubmission`] on malformed input.
#[instrument(skip(submissions), fields(submissions = submissions.len()))]
pub fn allocate(submissions: &[Submission], capacity: u32) -> AllocationResult<AllocationRun> {
    if submissions.is_empty() {
        return Err(AllocationError::NoSubmissions);
    }
    if capacity == 0 {
        return Err(AllocationError::InvalidCapacity(capacity));
    }

    let mut seen = HashSet::new();
    for submission in submissions {
        submission
            .validate()
            .map_err(|source| AllocationError::InvalidSubmission {
                prn: submission.prn.clone(),
                source,
            })?;
        if !seen.insert(&submission.prn) {
            return Err(AllocationError::DuplicateSubmission(submission.prn.clone()));
        }
    }

    // `sort_by` is stable: equal CGPAs stay in submission order.
    let mut ordered: Vec<&Submission> = submissions.iter().collect();
    ordered.sort_by(|a, b| b.cgpa.total_cmp(&a.cgpa));

    let mut seats: BTreeMap<SubjectName, u32> = BTreeMap::new();
    let mut allocations = Vec::with_capacity(ordered.len());

    'students: for submission in ordered {
        for preference in submission.preferences_by_rank() {
            let filled = seats.entry(preference.subject.clone()).or_insert(0);
            if *filled < capacity {
                *filled += 1;
                allocations.push(Allocation::granted(
                    submission,
                    preference.subject.clone(),
                    preference.rank,
                ));
                continue 'students;
            }
        }

        debug!(prn = %submission.prn, cgpa = %submission.cgpa, "All preferences full");
        allocations.push(Allocation::unallocated(submission));
    }

    let run = AllocationRun { allocations, seats };
    let summary = run.summary();
    info!(
        capacity,
        allocated = summary.allocated,
        not_allocated = summary.not_allocated,
        "Allocation run complete"
    );

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_roster::{AllocatedSubject, Cgpa, ClassId, RosterError, StudentName};
    use rstest::rstest;

    fn submission(prn: &str, cgpa: f64, subjects: [&str; 5]) -> Submission {
        Submission::ranked(
            Prn::parse(prn).unwrap(),
            StudentName::new(format!("Student {prn}")).unwrap(),
            ClassId::new("CSE-A").unwrap(),
            Cgpa::new(cgpa).unwrap(),
            subjects.into_iter().map(|s| SubjectName::new(s).unwrap()),
        )
    }

    fn subject_of(allocation: &Allocation) -> Option<&str> {
        allocation.allocated_subject.subject().map(|s| s.as_str())
    }

    #[test]
    fn test_higher_cgpa_takes_last_seat() {
        let submissions = vec![
            submission("0000000001", 9.1, ["A", "B", "C", "D", "E"]),
            submission("0000000002", 8.0, ["A", "F", "G", "H", "I"]),
        ];

        let run = allocate(&submissions, 1).unwrap();

        let first = run.allocation_for(&submissions[0].prn).unwrap();
        assert_eq!(subject_of(first), Some("A"));
        assert_eq!(first.rank, Some(1));

        let second = run.allocation_for(&submissions[1].prn).unwrap();
        assert_eq!(subject_of(second), Some("F"));
        assert_eq!(second.rank, Some(2));
    }

    #[test]
    fn test_input_order_does_not_beat_merit() {
        let submissions = vec![
            submission("0000000002", 8.0, ["A", "F", "G", "H", "I"]),
            submission("0000000001", 9.1, ["A", "B", "C", "D", "E"]),
        ];

        let run = allocate(&submissions, 1).unwrap();
        let low = run.allocation_for(&submissions[0].prn).unwrap();
        assert_eq!(subject_of(low), Some("F"));
        assert_eq!(run.allocations[0].prn, submissions[1].prn);
    }

    #[test]
    fn test_equal_cgpa_keeps_submission_order() {
        let submissions = vec![
            submission("0000000003", 8.5, ["A", "B", "C", "D", "E"]),
            submission("0000000001", 8.5, ["A", "B", "C", "D", "E"]),
            submission("0000000002", 8.5, ["A", "B", "C", "D", "E"]),
        ];

        let run = allocate(&submissions, 1).unwrap();
        let order: Vec<&str> = run.allocations.iter().map(|a| a.prn.as_str()).collect();
        assert_eq!(order, vec!["0000000003", "0000000001", "0000000002"]);

        let got: Vec<Option<&str>> = run.allocations.iter().map(subject_of).collect();
        assert_eq!(got, vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn test_signed_zero_cgpa_keeps_submission_order() {
        let first = submission("0000000001", -0.0, ["A", "B", "C", "D", "E"]);
        let second = submission("0000000002", 0.0, ["A", "B", "C", "D", "E"]);
        assert_eq!(first.cgpa, second.cgpa);

        let run = allocate(&[first, second], 1).unwrap();
        let order: Vec<&str> = run.allocations.iter().map(|a| a.prn.as_str()).collect();
        assert_eq!(order, vec!["0000000001", "0000000002"]);
        assert_eq!(subject_of(&run.allocations[0]), Some("A"));
    }

    #[test]
    fn test_unallocated_when_all_choices_full() {
        let submissions = vec![
            submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]),
            submission("0000000002", 8.0, ["A", "B", "C", "D", "E"]),
        ];

        let run = allocate(&submissions, 1).unwrap();
        let second = &run.allocations[1];
        assert_eq!(subject_of(second), Some("B"));

        let submissions = vec![
            submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]),
            submission("0000000002", 8.0, ["A", "B", "C", "D", "E"]),
            submission("0000000003", 7.0, ["A", "B", "C", "D", "E"]),
            submission("0000000004", 6.0, ["A", "B", "C", "D", "E"]),
            submission("0000000005", 5.0, ["A", "B", "C", "D", "E"]),
            submission("0000000006", 4.0, ["A", "B", "C", "D", "E"]),
        ];
        let run = allocate(&submissions, 1).unwrap();
        let last = run.allocations.last().unwrap();
        assert_eq!(last.allocated_subject, AllocatedSubject::Unallocated);
        assert_eq!(last.rank, None);

        let summary = run.summary();
        assert_eq!(summary.total_students, 6);
        assert_eq!(summary.allocated, 5);
        assert_eq!(summary.not_allocated, 1);
    }

    #[test]
    fn test_seat_counts_include_considered_subjects() {
        let submissions = vec![
            submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]),
            submission("0000000002", 8.0, ["A", "B", "C", "D", "E"]),
        ];

        let run = allocate(&submissions, 1).unwrap();
        let seats: Vec<(&str, u32)> = run.seats.iter().map(|(s, n)| (s.as_str(), *n)).collect();
        assert_eq!(seats, vec![("A", 1), ("B", 1)]);
    }

    #[test]
    fn test_empty_submissions_rejected() {
        assert_eq!(
            allocate(&[], DEFAULT_SUBJECT_CAPACITY).unwrap_err(),
            AllocationError::NoSubmissions
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let submissions = vec![submission("0000000001", 9.0, ["A", "B", "C", "D", "E"])];
        assert_eq!(
            allocate(&submissions, 0).unwrap_err(),
            AllocationError::InvalidCapacity(0)
        );
    }

    #[rstest]
    #[case::duplicate_subject(["A", "B", "A", "D", "E"])]
    #[case::all_same(["A", "A", "A", "A", "A"])]
    fn test_invalid_preferences_rejected(#[case] subjects: [&str; 5]) {
        let submissions = vec![submission("0000000001", 9.0, subjects)];
        let err = allocate(&submissions, 10).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidSubmission {
                source: RosterError::DuplicateSubject(_),
                ..
            }
        ));
    }

    #[test]
    fn test_short_preference_list_rejected() {
        let mut short = submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]);
        short.preferences.pop();
        let err = allocate(&[short], 10).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidSubmission {
                source: RosterError::PreferenceCount { actual: 4, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_student_rejected() {
        let submissions = vec![
            submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]),
            submission("0000000001", 7.0, ["F", "B", "C", "D", "E"]),
        ];
        assert!(matches!(
            allocate(&submissions, 10).unwrap_err(),
            AllocationError::DuplicateSubmission(_)
        ));
    }

    #[test]
    fn test_ranks_honoured_when_listed_out_of_order() {
        let mut sub = submission("0000000001", 9.0, ["A", "B", "C", "D", "E"]);
        sub.preferences.reverse();
        let run = allocate(&[sub], 10).unwrap();
        assert_eq!(subject_of(&run.allocations[0]), Some("A"));
        assert_eq!(run.allocations[0].rank, Some(1));
    }
}
