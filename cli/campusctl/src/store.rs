//! JSON file helpers.
//!
//! Results are written to a sibling temp file and renamed over the target,
//! so a reader sees either the old set or the new set, never a mix.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read and parse a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))
}

/// Read a JSON file, or return the default when it does not exist yet.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}

/// Replace a JSON file with `value`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let contents = serde_json::to_string_pretty(value)?;
    let staging = staging_path(path);
    fs::write(&staging, contents).with_context(|| format!("Failed to write {:?}", staging))?;
    fs::rename(&staging, path).with_context(|| format!("Failed to replace {:?}", path))?;

    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_electives::SubmissionLedger;

    #[test]
    fn test_missing_ledger_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger: SubmissionLedger =
            read_json_or_default(&dir.path().join("electives.json")).unwrap();
        assert!(ledger.submissions().is_empty());
    }

    #[test]
    fn test_write_replaces_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("timetables.json");

        write_json(&path, &vec!["first"]).unwrap();
        write_json(&path, &vec!["second"]).unwrap();

        let read: Vec<String> = read_json(&path).unwrap();
        assert_eq!(read, vec!["second".to_string()]);
        assert!(!staging_path(&path).exists());
    }
}
