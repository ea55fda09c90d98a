//! campusctl - operator CLI for campus scheduling.
//!
//! Feeds roster and submission files into the timetable and elective
//! engines and renders the results.

use anyhow::Result;
use clap::Parser;

mod commands;
mod error;
mod logging;
mod output;
mod settings;
mod store;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = cli.run() {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
