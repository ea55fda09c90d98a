//! CLI commands.

mod electives;
mod timetable;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use crate::settings::Settings;

/// campusctl - generate timetables and allocate electives.
#[derive(Debug, Parser)]
#[command(name = "campusctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format. Defaults to the configured format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Extra configuration file layered over the user config.
    #[arg(long, global = true, env = "CAMPUS_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate and inspect class timetables.
    Timetable(timetable::TimetableCommand),

    /// Record elective submissions and run allocations.
    Electives(electives::ElectivesCommand),
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let settings = Settings::load(self.config.as_deref())?;
        crate::logging::init(&settings.log_level, self.log_json);

        let format = self.format.unwrap_or(settings.format);
        let ctx = CommandContext { settings, format };

        match self.command {
            Commands::Timetable(cmd) => cmd.run(&ctx),
            Commands::Electives(cmd) => cmd.run(&ctx),
        }
    }
}

/// Context shared by all commands.
pub struct CommandContext {
    pub settings: Settings,
    pub format: OutputFormat,
}
