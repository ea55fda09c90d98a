//! Typed label and scalar definitions.
//!
//! Labels are opaque to the engines; they are compared, hashed, and printed,
//! never interpreted.

use crate::define_label;
use crate::RosterError;

// =============================================================================
// Labels
// =============================================================================

define_label!(
    /// Name of a teacher; unique within one timetable run.
    TeacherName,
    "teacher name"
);
define_label!(
    /// Opaque class section identifier, e.g. `CSE-A`.
    ClassId,
    "class identifier"
);
define_label!(
    /// Name of a subject taught by a teacher or offered as an elective.
    SubjectName,
    "subject name"
);
define_label!(StudentName, "student name");

// =============================================================================
// PRN
// =============================================================================

/// Permanent registration number: exactly ten decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Prn(String);

impl Prn {
    /// Number of digits in a PRN.
    pub const LEN: usize = 10;

    /// Parses a PRN, rejecting anything other than ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, RosterError> {
        if s.len() == Self::LEN && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(RosterError::InvalidPrn(s.to_string()))
        }
    }

    /// Returns the PRN digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Prn {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Prn {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Prn {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// CGPA
// =============================================================================

/// Cumulative grade point average on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cgpa(f64);

impl Cgpa {
    /// Highest attainable CGPA.
    pub const MAX: f64 = 10.0;

    /// Creates a CGPA, rejecting non-finite values and values outside 0-10.
    ///
    /// `-0.0` is stored as `0.0` so equal CGPAs also order as equal.
    pub fn new(value: f64) -> Result<Self, RosterError> {
        if value.is_finite() && (0.0..=Self::MAX).contains(&value) {
            Ok(Self(if value == 0.0 { 0.0 } else { value }))
        } else {
            Err(RosterError::InvalidCgpa(value))
        }
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Total ordering over CGPA values.
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::fmt::Display for Cgpa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Cgpa {
    type Error = RosterError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl serde::Serialize for Cgpa {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Cgpa {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================
