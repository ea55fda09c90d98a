//! Layered CLI settings.
//!
//! Sources, lowest precedence first:
//! - Built-in defaults
//! - `config.toml` in the user config directory
//! - An explicit `--config` file
//! - `CAMPUS_*` environment variables (e.g. `CAMPUS_SUBJECT_CAPACITY=40`)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use campus_electives::DEFAULT_SUBJECT_CAPACITY;
use campus_roster::{ElectiveCatalog, DEFAULT_ELECTIVES};
use config::{Environment, File};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::output::OutputFormat;

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Environment variable prefix.
const ENV_PREFIX: &str = "CAMPUS";

/// Get the default config file path.
fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("edu", "campus", "campusctl").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// CLI settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Seats per elective subject.
    #[serde(default = "default_subject_capacity")]
    pub subject_capacity: u32,

    /// Default output format (table or json).
    #[serde(default)]
    pub format: OutputFormat,

    /// Offered elective subjects.
    #[serde(default = "default_electives")]
    pub electives: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_subject_capacity() -> u32 {
    DEFAULT_SUBJECT_CAPACITY
}

fn default_electives() -> Vec<String> {
    DEFAULT_ELECTIVES.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            subject_capacity: default_subject_capacity(),
            format: OutputFormat::default(),
            electives: default_electives(),
        }
    }
}

impl Settings {
    /// Load settings from every layer.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(default_config_path().as_deref(), explicit)
    }

    fn load_from(user_file: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("electives"),
        );

        builder
            .build()
            .and_then(|layers| layers.try_deserialize())
            .context("Failed to load configuration")
    }

    /// The configured elective catalog.
    pub fn catalog(&self) -> Result<ElectiveCatalog> {
        ElectiveCatalog::new(self.electives.iter().cloned())
            .context("Invalid `electives` list in configuration")
    }
}
