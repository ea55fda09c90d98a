//! Live submissions plus the most recent allocation set.
//!
//! The ledger is what a caller keeps between runs: one submission per PRN
//! in first-submission order, and the allocation records of the last run.
//! It owns no storage; callers serialize it however they like.

use campus_roster::{Allocation, Prn, Submission};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::engine::{allocate, AllocationRun};
use crate::error::{AllocationError, AllocationResult};
use crate::guard::ensure_modifiable;

/// Whether a submission was new or replaced an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
}

/// A student's submission and allocation, either of which may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StudentStatus<'a> {
    pub submission: Option<&'a Submission>,
    pub allocation: Option<&'a Allocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionLedger {
    #[serde(default)]
    submissions: Vec<Submission>,
    #[serde(default)]
    allocations: Vec<Allocation>,
}

impl SubmissionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn allocations(&self) -> &[Allocation] {
        &self.allocations
    }

    pub fn submission_for(&self, prn: &Prn) -> Option<&Submission> {
        self.submissions.iter().find(|s| &s.prn == prn)
    }

    pub fn allocation_for(&self, prn: &Prn) -> Option<&Allocation> {
        self.allocations.iter().find(|a| &a.prn == prn)
    }

    pub fn status(&self, prn: &Prn) -> StudentStatus<'_> {
        StudentStatus {
            submission: self.submission_for(prn),
            allocation: self.allocation_for(prn),
        }
    }

    /// Record a submission, replacing any earlier one from the same student.
    ///
    /// The submission must be well formed, and the student must not already
    /// hold a real allocation. An update keeps its original position and
    /// `submitted_at`; `updated_at` is set to `now`.
    #[instrument(skip(self, submission, now), fields(prn = %submission.prn))]
    pub fn submit(
        &mut self,
        mut submission: Submission,
        now: DateTime<Utc>,
    ) -> AllocationResult<SubmitOutcome> {
        submission
            .validate()
            .map_err(|source| AllocationError::InvalidSubmission {
                prn: submission.prn.clone(),
                source,
            })?;
        ensure_modifiable(self.allocation_for(&submission.prn))?;

        submission.updated_at = Some(now);
        let existing = self.submissions.iter().position(|s| s.prn == submission.prn);

        match existing {
            Some(index) => {
                submission.submitted_at = self.submissions[index].submitted_at.or(Some(now));
                self.submissions[index] = submission;
                info!("Submission updated");
                Ok(SubmitOutcome::Updated)
            }
            None => {
                submission.submitted_at = Some(now);
                self.submissions.push(submission);
                info!("Submission recorded");
                Ok(SubmitOutcome::Created)
            }
        }
    }

    /// Allocate seats over every live submission and replace the stored
    /// allocation set with the result.
    ///
    /// On error the previous allocation set is left untouched.
    pub fn allocate(&mut self, capacity: u32) -> AllocationResult<AllocationRun> {
        let run = allocate(&self.submissions, capacity)?;
        self.allocations = run.allocations.clone();
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_roster::{Cgpa, ClassId, StudentName, SubjectName};
    use chrono::TimeZone;

    fn submission(prn: &str, cgpa: f64, subjects: [&str; 5]) -> Submission {
        Submission::ranked(
            Prn::parse(prn).unwrap(),
            StudentName::new("Student").unwrap(),
            ClassId::new("CSE-A").unwrap(),
            Cgpa::new(cgpa).unwrap(),
            subjects.into_iter().map(|s| SubjectName::new(s).unwrap()),
        )
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_submit_then_update_keeps_submitted_at() {
        let mut ledger = SubmissionLedger::new();
        let prn = Prn::parse("1111111111").unwrap();

        let outcome = ledger
            .submit(submission("1111111111", 8.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Created);

        let outcome = ledger
            .submit(submission("1111111111", 8.2, ["E", "D", "C", "B", "A"]), at(11))
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);
        assert_eq!(ledger.submissions().len(), 1);

        let stored = ledger.submission_for(&prn).unwrap();
        assert_eq!(stored.submitted_at, Some(at(9)));
        assert_eq!(stored.updated_at, Some(at(11)));
        assert_eq!(stored.preferences[0].subject.as_str(), "E");
    }

    #[test]
    fn test_submit_rejects_malformed_preferences() {
        let mut ledger = SubmissionLedger::new();
        let err = ledger
            .submit(submission("1111111111", 8.0, ["A", "A", "C", "D", "E"]), at(9))
            .unwrap_err();
        assert!(matches!(err, AllocationError::InvalidSubmission { .. }));
        assert!(ledger.submissions().is_empty());
    }

    #[test]
    fn test_allocated_student_cannot_resubmit() {
        let mut ledger = SubmissionLedger::new();
        ledger
            .submit(submission("1111111111", 9.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        ledger.allocate(60).unwrap();

        let err = ledger
            .submit(submission("1111111111", 9.0, ["B", "A", "C", "D", "E"]), at(10))
            .unwrap_err();
        assert!(err.is_modification_denied());
    }

    #[test]
    fn test_unallocated_student_may_resubmit() {
        let mut ledger = SubmissionLedger::new();
        ledger
            .submit(submission("1111111111", 9.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        ledger
            .submit(submission("2222222222", 5.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        ledger.allocate(1).unwrap();

        // Five subjects with one seat each: the sixth student is shut out.
        ledger
            .submit(submission("3333333333", 4.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        for (i, prn) in ["4444444444", "5555555555", "6666666666"].iter().enumerate() {
            ledger
                .submit(submission(prn, 3.0 - i as f64, ["A", "B", "C", "D", "E"]), at(9))
                .unwrap();
        }
        ledger.allocate(1).unwrap();

        let shut_out = Prn::parse("6666666666").unwrap();
        assert!(!ledger.allocation_for(&shut_out).unwrap().is_allocated());

        let outcome = ledger
            .submit(submission("6666666666", 1.0, ["F", "G", "H", "I", "J"]), at(12))
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Updated);
    }

    #[test]
    fn test_allocate_replaces_previous_set() {
        let mut ledger = SubmissionLedger::new();
        ledger
            .submit(submission("1111111111", 9.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        ledger.allocate(60).unwrap();
        assert_eq!(ledger.allocations().len(), 1);

        ledger
            .submit(submission("2222222222", 8.0, ["A", "B", "C", "D", "E"]), at(10))
            .unwrap();
        let run = ledger.allocate(60).unwrap();
        assert_eq!(run.allocations.len(), 2);
        assert_eq!(ledger.allocations(), run.allocations.as_slice());
    }

    #[test]
    fn test_allocate_empty_ledger_keeps_state() {
        let mut ledger = SubmissionLedger::new();
        assert_eq!(
            ledger.allocate(60).unwrap_err(),
            AllocationError::NoSubmissions
        );
        assert!(ledger.allocations().is_empty());
    }

    #[test]
    fn test_status_reports_both_halves() {
        let mut ledger = SubmissionLedger::new();
        let prn = Prn::parse("1111111111").unwrap();
        assert_eq!(
            ledger.status(&prn),
            StudentStatus {
                submission: None,
                allocation: None
            }
        );

        ledger
            .submit(submission("1111111111", 9.0, ["A", "B", "C", "D", "E"]), at(9))
            .unwrap();
        ledger.allocate(60).unwrap();

        let status = ledger.status(&prn);
        assert!(status.submission.is_some());
        assert_eq!(status.allocation.and_then(|a| a.rank), Some(1));
    }
}
