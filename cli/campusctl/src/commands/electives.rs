//! Elective commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use campus_electives::{AllocationRun, SubmissionLedger, SubmitOutcome};
use campus_roster::{Allocation, Prn, Submission};
use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_info, print_output, print_single, print_success, OutputFormat};
use crate::store::{read_json, read_json_or_default, write_json};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct ElectivesCommand {
    #[command(subcommand)]
    command: ElectivesSubcommand,
}

#[derive(Debug, Subcommand)]
enum ElectivesSubcommand {
    /// Record or update a student's submission.
    Submit(SubmitArgs),

    /// Allocate seats over every recorded submission.
    Allocate(AllocateArgs),

    /// Show one student's submission and allocation.
    Status(StatusArgs),

    /// List the offered electives.
    Catalog,
}

#[derive(Debug, Args)]
struct SubmitArgs {
    /// Ledger file holding submissions and the latest allocation.
    #[arg(long)]
    ledger: PathBuf,

    /// Submission file (one JSON submission).
    #[arg(long)]
    submission: PathBuf,
}

#[derive(Debug, Args)]
struct AllocateArgs {
    /// Ledger file holding submissions and the latest allocation.
    #[arg(long)]
    ledger: PathBuf,

    /// Seats per subject. Defaults to the configured capacity.
    #[arg(long)]
    capacity: Option<u32>,
}

#[derive(Debug, Args)]
struct StatusArgs {
    /// Ledger file holding submissions and the latest allocation.
    #[arg(long)]
    ledger: PathBuf,

    /// Student PRN (10 digits).
    #[arg(long)]
    prn: String,
}

#[derive(Debug, Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "PRN")]
    prn: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Class")]
    class_id: String,
    #[tabled(rename = "CGPA")]
    cgpa: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Choice")]
    rank: String,
}

impl From<&Allocation> for AllocationRow {
    fn from(allocation: &Allocation) -> Self {
        Self {
            prn: allocation.prn.to_string(),
            name: allocation.name.to_string(),
            class_id: allocation.class_id.to_string(),
            cgpa: allocation.cgpa.to_string(),
            subject: allocation.allocated_subject.to_string(),
            rank: allocation
                .rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct SeatRow {
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Filled")]
    filled: u32,
    #[tabled(rename = "Capacity")]
    capacity: u32,
}

#[derive(Debug, Serialize, Tabled)]
struct PreferenceRow {
    #[tabled(rename = "Choice")]
    rank: u8,
    #[tabled(rename = "Subject")]
    subject: String,
}

#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    #[tabled(rename = "Elective")]
    subject: String,
}

fn seat_rows(run: &AllocationRun, capacity: u32) -> Vec<SeatRow> {
    run.seats
        .iter()
        .map(|(subject, filled)| SeatRow {
            subject: subject.to_string(),
            filled: *filled,
            capacity,
        })
        .collect()
}

impl ElectivesCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            ElectivesSubcommand::Submit(args) => submit(args, ctx),
            ElectivesSubcommand::Allocate(args) => allocate(args, ctx),
            ElectivesSubcommand::Status(args) => status(args, ctx),
            ElectivesSubcommand::Catalog => catalog(ctx),
        }
    }
}

fn submit(args: SubmitArgs, ctx: &CommandContext) -> Result<()> {
    let submission: Submission = read_json(&args.submission)?;
    ctx.settings
        .catalog()?
        .check_submission(&submission)
        .map_err(CliError::from)?;

    let mut ledger: SubmissionLedger = read_json_or_default(&args.ledger)?;
    let prn = submission.prn.clone();
    let outcome = ledger
        .submit(submission, Utc::now())
        .map_err(CliError::from)?;
    write_json(&args.ledger, &ledger)?;

    match ctx.format {
        OutputFormat::Json => print_single(&ledger.status(&prn)),
        OutputFormat::Table => match outcome {
            SubmitOutcome::Created => print_success(&format!("Recorded preferences for {prn}")),
            SubmitOutcome::Updated => print_success(&format!("Updated preferences for {prn}")),
        },
    }

    Ok(())
}

fn allocate(args: AllocateArgs, ctx: &CommandContext) -> Result<()> {
    let capacity = args.capacity.unwrap_or(ctx.settings.subject_capacity);

    let mut ledger: SubmissionLedger = read_json_or_default(&args.ledger)?;
    let run = ledger.allocate(capacity).map_err(CliError::from)?;
    write_json(&args.ledger, &ledger)?;

    let summary = run.summary();
    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "allocations": run.allocations,
            "summary": summary,
        })),
        OutputFormat::Table => {
            let rows: Vec<AllocationRow> = run.allocations.iter().map(AllocationRow::from).collect();
            print_output(&rows, ctx.format);
            print_output(&seat_rows(&run, capacity), ctx.format);
            print_success(&format!(
                "Allocated {} of {} students ({} not allocated)",
                summary.allocated, summary.total_students, summary.not_allocated
            ));
        }
    }

    Ok(())
}

fn status(args: StatusArgs, ctx: &CommandContext) -> Result<()> {
    let prn = Prn::parse(&args.prn).map_err(CliError::from)?;
    let ledger: SubmissionLedger = read_json(&args.ledger)
        .with_context(|| format!("No ledger at {:?}", args.ledger))?;

    let status = ledger.status(&prn);
    if status.submission.is_none() && status.allocation.is_none() {
        return Err(CliError::NotFound(format!("no submission for {prn}")).into());
    }

    match ctx.format {
        OutputFormat::Json => print_single(&status),
        OutputFormat::Table => {
            if let Some(submission) = status.submission {
                let rows: Vec<PreferenceRow> = submission
                    .preferences_by_rank()
                    .into_iter()
                    .map(|p| PreferenceRow {
                        rank: p.rank,
                        subject: p.subject.to_string(),
                    })
                    .collect();
                print_output(&rows, ctx.format);
            }
            match status.allocation {
                Some(allocation) if allocation.is_allocated() => print_success(&format!(
                    "{} is allocated to {} (choice {})",
                    prn,
                    allocation.allocated_subject,
                    allocation.rank.unwrap_or_default()
                )),
                Some(_) => print_info(&format!(
                    "{prn} was not allocated; preferences may still be changed"
                )),
                None => print_info(&format!("{prn} is awaiting allocation")),
            }
        }
    }

    Ok(())
}

fn catalog(ctx: &CommandContext) -> Result<()> {
    let rows: Vec<CatalogRow> = ctx
        .settings
        .catalog()?
        .iter()
        .map(|s| CatalogRow {
            subject: s.to_string(),
        })
        .collect();
    print_output(&rows, ctx.format);
    Ok(())
}
