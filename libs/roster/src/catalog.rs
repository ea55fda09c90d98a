//! The elective subject catalog callers validate submissions against.

use std::collections::BTreeSet;

use crate::{RosterError, Submission, SubjectName};

/// Electives offered when no catalog is configured.
pub const DEFAULT_ELECTIVES: [&str; 8] = [
    "Machine Learning",
    "Blockchain Technology",
    "Cloud Computing",
    "Cyber Security",
    "Data Science",
    "IoT Applications",
    "Mobile App Development",
    "Artificial Intelligence",
];

/// A fixed set of elective subject names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectiveCatalog {
    subjects: BTreeSet<SubjectName>,
}

impl ElectiveCatalog {
    /// Builds a catalog from subject names; blank names are rejected.
    pub fn new<I, S>(subjects: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let subjects = subjects
            .into_iter()
            .map(SubjectName::new)
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Self { subjects })
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectName> {
        self.subjects.iter()
    }

    /// Validates the submission's shape and that every choice is offered.
    pub fn check_submission(&self, submission: &Submission) -> Result<(), RosterError> {
        submission.validate()?;
        for preference in &submission.preferences {
            if !self.contains(preference.subject.as_str()) {
                return Err(RosterError::UnknownSubject(
                    preference.subject.to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for ElectiveCatalog {
    fn default() -> Self {
        let subjects = DEFAULT_ELECTIVES
            .iter()
            .filter_map(|s| SubjectName::new(*s).ok())
            .collect();
        Self { subjects }
    }
}
