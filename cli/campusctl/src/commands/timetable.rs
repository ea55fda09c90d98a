//! Timetable commands.

use std::path::PathBuf;

use anyhow::Result;
use campus_roster::{ClassSection, Teacher};
use campus_timetable::{
    find_class_timetable, find_conflicts, generate_timetables, teacher_load, ClassTimetable,
    Conflict,
};
use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::CliError;
use crate::output::{print_info, print_output, print_single, print_success, print_warning, OutputFormat};
use crate::store::{read_json, write_json};

use super::CommandContext;

#[derive(Debug, Args)]
pub struct TimetableCommand {
    #[command(subcommand)]
    command: TimetableSubcommand,
}

#[derive(Debug, Subcommand)]
enum TimetableSubcommand {
    /// Generate a weekly timetable for every class in a roster file.
    Generate(GenerateArgs),

    /// Show the timetable for one class.
    Show(ShowArgs),

    /// List teachers booked into more than one class at the same time.
    Conflicts(ConflictsArgs),
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Roster file: `{ "teachers": [{ "name", "subject" }], "classes": [..] }`.
    #[arg(long)]
    input: PathBuf,

    /// Where to write the generated timetables (replaced wholesale).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Generated timetables file.
    #[arg(long)]
    input: PathBuf,

    /// Class identifier, e.g. CSE-A.
    #[arg(long = "class")]
    class_id: String,
}

#[derive(Debug, Args)]
struct ConflictsArgs {
    /// Generated timetables file.
    #[arg(long)]
    input: PathBuf,
}

/// Roster input file.
#[derive(Debug, Deserialize)]
struct RosterFile {
    teachers: Vec<Teacher>,
    classes: Vec<ClassSection>,
}

#[derive(Debug, Serialize, Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    class_id: String,
    #[tabled(rename = "Periods")]
    periods: usize,
    #[tabled(rename = "Fallbacks")]
    fallbacks: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct LoadRow {
    #[tabled(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Periods")]
    periods: usize,
}

#[derive(Debug, Serialize, Tabled)]
struct PeriodRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Subject")]
    subject: String,
    #[tabled(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Note")]
    note: String,
}

#[derive(Debug, Serialize, Tabled)]
struct ConflictRow {
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Period")]
    period: usize,
    #[tabled(rename = "Teacher")]
    teacher: String,
    #[tabled(rename = "Classes")]
    classes: String,
}

impl From<&Conflict> for ConflictRow {
    fn from(conflict: &Conflict) -> Self {
        Self {
            day: conflict.day.to_string(),
            period: conflict.period,
            teacher: conflict.teacher.to_string(),
            classes: conflict
                .classes
                .iter()
                .map(|c| c.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

fn period_rows(timetable: &ClassTimetable) -> Vec<PeriodRow> {
    timetable
        .entries()
        .map(|entry| PeriodRow {
            day: entry.slot.day.to_string(),
            time: entry.slot.time.clone(),
            subject: entry.subject.to_string(),
            teacher: entry.teacher.to_string(),
            room: entry.room.clone(),
            note: if entry.fallback {
                "double-booked".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

impl TimetableCommand {
    pub fn run(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            TimetableSubcommand::Generate(args) => generate(args, ctx),
            TimetableSubcommand::Show(args) => show(args, ctx),
            TimetableSubcommand::Conflicts(args) => conflicts(args, ctx),
        }
    }
}

fn generate(args: GenerateArgs, ctx: &CommandContext) -> Result<()> {
    let roster: RosterFile = read_json(&args.input)?;
    let timetables =
        generate_timetables(&roster.teachers, &roster.classes).map_err(CliError::from)?;

    if let Some(path) = &args.output {
        write_json(path, &timetables)?;
    }

    match ctx.format {
        OutputFormat::Json => print_single(&timetables),
        OutputFormat::Table => {
            print_success(&format!(
                "Generated timetables for {} classes",
                timetables.len()
            ));

            let rows: Vec<ClassRow> = timetables
                .iter()
                .map(|t| ClassRow {
                    class_id: t.class_id.to_string(),
                    periods: t.entries().count(),
                    fallbacks: t.fallback_count(),
                })
                .collect();
            print_output(&rows, ctx.format);

            let load: Vec<LoadRow> = teacher_load(&timetables)
                .into_iter()
                .map(|(teacher, periods)| LoadRow {
                    teacher: teacher.into_inner(),
                    periods,
                })
                .collect();
            print_output(&load, ctx.format);

            let conflicts = find_conflicts(&timetables);
            if !conflicts.is_empty() {
                print_warning(&format!(
                    "{} slots double-book a teacher; run `campusctl timetable conflicts` for details",
                    conflicts.len()
                ));
            }
            if let Some(path) = &args.output {
                print_info(&format!("Wrote {}", path.display()));
            }
        }
    }

    Ok(())
}

fn show(args: ShowArgs, ctx: &CommandContext) -> Result<()> {
    let timetables: Vec<ClassTimetable> = read_json(&args.input)?;
    let timetable = find_class_timetable(&timetables, &args.class_id).ok_or_else(|| {
        CliError::NotFound(format!("no timetable for class '{}'", args.class_id))
    })?;

    match ctx.format {
        OutputFormat::Json => print_single(timetable),
        OutputFormat::Table => print_output(&period_rows(timetable), ctx.format),
    }

    Ok(())
}

fn conflicts(args: ConflictsArgs, ctx: &CommandContext) -> Result<()> {
    let timetables: Vec<ClassTimetable> = read_json(&args.input)?;
    let rows: Vec<ConflictRow> = find_conflicts(&timetables).iter().map(ConflictRow::from).collect();
    print_output(&rows, ctx.format);
    Ok(())
}
