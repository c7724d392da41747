//! Durable output: one file per participant plus the summary file

use super::SummaryReport;
use crate::config::{OutputConfig, OutputFormat};
use crate::derangement::{Assignment, SearchOutcome};
use crate::error::SantaError;
use crate::roster::Roster;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Where the files go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// The existing working directory
    CurrentDirectory(PathBuf),
    /// A directory that must not exist yet and is created on write
    NewDirectory(PathBuf),
}

/// Writes an accepted assignment to disk
#[derive(Debug, Clone)]
pub struct OutputSink {
    target: OutputTarget,
    format: OutputFormat,
    summary_file: String,
}

impl OutputSink {
    pub fn new(
        target: OutputTarget,
        format: OutputFormat,
        summary_file: impl Into<String>,
    ) -> Self {
        Self {
            target,
            format,
            summary_file: summary_file.into(),
        }
    }

    /// Resolve the target from configuration; no directory means the
    /// current working directory
    pub fn from_config(config: &OutputConfig) -> Result<Self, SantaError> {
        let target = match &config.output_directory {
            Some(dir) => OutputTarget::NewDirectory(dir.clone()),
            None => OutputTarget::CurrentDirectory(
                std::env::current_dir().map_err(|e| SantaError::io(".", e))?,
            ),
        };
        Ok(Self::new(target, config.format, config.summary_file_name()))
    }

    pub fn directory(&self) -> &Path {
        match &self.target {
            OutputTarget::CurrentDirectory(dir) | OutputTarget::NewDirectory(dir) => dir,
        }
    }

    pub fn summary_path(&self) -> PathBuf {
        self.directory().join(&self.summary_file)
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Fail fast before searching: the target directory must be free, no
    /// participant file may overwrite the summary, and in the current
    /// directory no file we would write may already exist
    pub fn check(&self, roster: &Roster) -> Result<(), SantaError> {
        self.check_names(roster)?;

        match &self.target {
            OutputTarget::NewDirectory(dir) if dir.exists() => {
                Err(SantaError::OutputDirectoryExists(dir.clone()))
            }
            OutputTarget::NewDirectory(_) => Ok(()),
            OutputTarget::CurrentDirectory(dir) => {
                let taken = roster
                    .participants()
                    .iter()
                    .map(|name| dir.join(name))
                    .chain(std::iter::once(self.summary_path()))
                    .find(|path| path.exists());
                match taken {
                    Some(path) => Err(SantaError::OutputFileExists(path)),
                    None => Ok(()),
                }
            }
        }
    }

    fn check_names(&self, roster: &Roster) -> Result<(), SantaError> {
        match roster.participants().iter().find(|name| **name == self.summary_file) {
            Some(name) => Err(SantaError::ReservedName(name.clone())),
            None => Ok(()),
        }
    }

    /// Create the directory and write every file; stops at the first
    /// failure without removing what was already written.
    ///
    /// Existing directories and files are never reused, even if they
    /// appeared after [`OutputSink::check`] ran.
    pub fn write(&self, roster: &Roster, outcome: &SearchOutcome) -> Result<PathBuf, SantaError> {
        self.check_names(roster)?;

        let dir = self.directory();
        if let OutputTarget::NewDirectory(_) = self.target {
            create_new_dir(dir)?;
        }

        for (giver, recipient) in outcome.assignment.pairs(roster) {
            write_new_file(&dir.join(giver), &format!("{}\n", recipient))?;
        }

        let summary_path = self.summary_path();
        let content = SummaryReport::new(roster, outcome).render(self.format)?;
        write_new_file(&summary_path, &content)?;

        Ok(summary_path)
    }

    /// Re-read the summary and rebuild the assignment it records
    pub fn load_assignment(&self, roster: &Roster) -> anyhow::Result<Assignment> {
        let report = SummaryReport::load_from_file(self.summary_path(), self.format)?;
        report
            .to_assignment(roster)
            .context("Summary pairs do not match the participant list")
    }
}

fn create_new_dir(dir: &Path) -> Result<(), SantaError> {
    if let Some(parent) = dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SantaError::io(parent, e))?;
    }
    fs::create_dir(dir).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => SantaError::OutputDirectoryExists(dir.to_path_buf()),
        _ => SantaError::io(dir, e),
    })
}

fn write_new_file(path: &Path, content: &str) -> Result<(), SantaError> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => SantaError::OutputFileExists(path.to_path_buf()),
            _ => SantaError::io(path, e),
        })?;
    file.write_all(content.as_bytes()).map_err(|e| SantaError::io(path, e))
}
