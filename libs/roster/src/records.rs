//! Input and output records exchanged with the engines.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Cgpa, ClassId, Prn, RosterError, StudentName, SubjectName, TeacherName};
use crate::PREFERENCE_COUNT;

// =============================================================================
// Timetable inputs
// =============================================================================

/// A teacher and the single subject they teach for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub name: TeacherName,
    pub subject: SubjectName,
}

impl Teacher {
    pub fn new(name: TeacherName, subject: SubjectName) -> Self {
        Self { name, subject }
    }
}

/// A class section that needs a weekly timetable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSection {
    pub id: ClassId,
}

impl ClassSection {
    pub fn new(id: ClassId) -> Self {
        Self { id }
    }
}

impl From<ClassId> for ClassSection {
    fn from(id: ClassId) -> Self {
        Self { id }
    }
}

// =============================================================================
// Elective inputs
// =============================================================================

/// One ranked elective choice. Rank 1 is the most preferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub subject: SubjectName,
    pub rank: u8,
}

impl Preference {
    pub fn new(subject: SubjectName, rank: u8) -> Self {
        Self { subject, rank }
    }
}

/// A student's elective submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub prn: Prn,
    pub name: StudentName,
    pub class_id: ClassId,
    pub cgpa: Cgpa,
    pub preferences: Vec<Preference>,

    /// When the student first submitted; kept across updates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Submission {
    /// Builds a submission from subjects listed most-preferred first.
    pub fn ranked(
        prn: Prn,
        name: StudentName,
        class_id: ClassId,
        cgpa: Cgpa,
        subjects: impl IntoIterator<Item = SubjectName>,
    ) -> Self {
        let preferences = subjects
            .into_iter()
            .zip(1u8..)
            .map(|(subject, rank)| Preference::new(subject, rank))
            .collect();

        Self {
            prn,
            name,
            class_id,
            cgpa,
            preferences,
            submitted_at: None,
            updated_at: None,
        }
    }

    /// Checks the preference list: exactly five entries, distinct subjects,
    /// and ranks 1 through 5 each used once.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.preferences.len() != PREFERENCE_COUNT {
            return Err(RosterError::PreferenceCount {
                expected: PREFERENCE_COUNT,
                actual: self.preferences.len(),
            });
        }

        let mut subjects = BTreeSet::new();
        for preference in &self.preferences {
            if !subjects.insert(preference.subject.as_str()) {
                return Err(RosterError::DuplicateSubject(
                    preference.subject.to_string(),
                ));
            }
        }

        let ranks: BTreeSet<u8> = self.preferences.iter().map(|p| p.rank).collect();
        let expected: BTreeSet<u8> = (1..=PREFERENCE_COUNT as u8).collect();
        if ranks != expected {
            return Err(RosterError::InvalidRanks {
                max: PREFERENCE_COUNT,
                ranks: self.preferences.iter().map(|p| p.rank).collect(),
            });
        }

        Ok(())
    }

    /// Preferences ordered by rank, most preferred first.
    pub fn preferences_by_rank(&self) -> Vec<&Preference> {
        let mut ordered: Vec<&Preference> = self.preferences.iter().collect();
        ordered.sort_by_key(|p| p.rank);
        ordered
    }
}

// =============================================================================
// Elective outputs
// =============================================================================

/// The subject placed in an allocation record, or the unallocated sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum AllocatedSubject {
    Subject(SubjectName),
    Unallocated,
}

impl AllocatedSubject {
    /// Wire form of the unallocated sentinel.
    pub const UNALLOCATED: &'static str = "unallocated";

    /// Returns the subject, if one was allocated.
    pub fn subject(&self) -> Option<&SubjectName> {
        match self {
            Self::Subject(subject) => Some(subject),
            Self::Unallocated => None,
        }
    }

    pub fn is_unallocated(&self) -> bool {
        matches!(self, Self::Unallocated)
    }
}

impl std::fmt::Display for AllocatedSubject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Subject(subject) => f.write_str(subject.as_str()),
            Self::Unallocated => f.write_str(Self::UNALLOCATED),
        }
    }
}

impl From<AllocatedSubject> for String {
    fn from(value: AllocatedSubject) -> Self {
        match value {
            AllocatedSubject::Subject(subject) => subject.into_inner(),
            AllocatedSubject::Unallocated => AllocatedSubject::UNALLOCATED.to_string(),
        }
    }
}

impl TryFrom<String> for AllocatedSubject {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == Self::UNALLOCATED {
            return Ok(Self::Unallocated);
        }
        SubjectName::new(value).map(Self::Subject)
    }
}

/// Outcome of one allocation run for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub prn: Prn,
    pub name: StudentName,
    pub class_id: ClassId,
    pub cgpa: Cgpa,
    pub allocated_subject: AllocatedSubject,

    /// Rank of the preference that was granted; `None` when unallocated.
    pub rank: Option<u8>,
}

impl Allocation {
    /// An allocation granting `subject` at `rank` to the submitting student.
    pub fn granted(submission: &Submission, subject: SubjectName, rank: u8) -> Self {
        Self {
            prn: submission.prn.clone(),
            name: submission.name.clone(),
            class_id: submission.class_id.clone(),
            cgpa: submission.cgpa,
            allocated_subject: AllocatedSubject::Subject(subject),
            rank: Some(rank),
        }
    }

    /// An allocation recording that none of the student's choices had room.
    pub fn unallocated(submission: &Submission) -> Self {
        Self {
            prn: submission.prn.clone(),
            name: submission.name.clone(),
            class_id: submission.class_id.clone(),
            cgpa: submission.cgpa,
            allocated_subject: AllocatedSubject::Unallocated,
            rank: None,
        }
    }

    /// Returns true if a real subject was allocated.
    pub fn is_allocated(&self) -> bool {
        !self.allocated_subject.is_unallocated()
    }
}
