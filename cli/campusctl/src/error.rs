//! Error handling and display for the CLI.

use campus_electives::AllocationError;
use campus_roster::RosterError;
use campus_timetable::TimetableError;
use colored::Colorize;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Timetable error: {0}")]
    Timetable(#[from] TimetableError),

    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    #[error("Invalid record: {0}")]
    Roster(#[from] RosterError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    if let Some(hint) = err.downcast_ref::<CliError>().and_then(hint_for) {
        eprintln!("\n{}", format!("Hint: {hint}").yellow());
    }
}

fn hint_for(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Timetable(TimetableError::InvalidInput(_)) => Some(
            "The roster file needs non-empty `teachers` ([{name, subject}]) and `classes` ([\"CSE-A\", ...]) lists.",
        ),
        CliError::Allocation(AllocationError::NoSubmissions) => {
            Some("Record submissions first with `campusctl electives submit`.")
        }
        CliError::Allocation(AllocationError::ModificationDenied { .. }) => {
            Some("Allocations are final once a subject is granted.")
        }
        CliError::Allocation(AllocationError::InvalidCapacity(_)) => {
            Some("Pass a positive `--capacity` or set `subject_capacity` in the config.")
        }
        CliError::Roster(RosterError::UnknownSubject(_)) => {
            Some("Run `campusctl electives catalog` to list the offered electives.")
        }
        CliError::Roster(RosterError::InvalidPrn(_)) => Some("A PRN is exactly 10 digits."),
        _ => None,
    }
}
