//! Error taxonomy for the Secret Santa assigner

use crate::derangement::Violation;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Fatal failures surfaced to the top level
#[derive(Debug, Error)]
pub enum SantaError {
    #[error("duplicate participant: {0}")]
    DuplicateParticipant(String),

    #[error("invalid participant name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("exclusions given for unknown participant {0}")]
    UnknownGiver(String),

    #[error("exclusions for {giver} reference unknown participant {unknown}")]
    UnknownExclusion { giver: String, unknown: String },

    #[error("no exclusion entry for participant {0}")]
    MissingExclusions(String),

    #[error("at least 2 participants are required, got {0}")]
    InsufficientParticipants(usize),

    #[error("no assignment satisfies the exclusions for these participants")]
    Infeasible,

    #[error(
        "search exhausted after {attempts} attempts ({failures} failed) in {:.3}s",
        .elapsed.as_secs_f64()
    )]
    SearchExhausted {
        attempts: u64,
        failures: u64,
        elapsed: Duration,
        last_rejection: Option<Violation>,
    },

    #[error("output directory already exists: {}", .0.display())]
    OutputDirectoryExists(PathBuf),

    #[error("refusing to overwrite existing file: {}", .0.display())]
    OutputFileExists(PathBuf),

    #[error("participant name {0:?} collides with the summary file")]
    ReservedName(String),

    #[error("failed to serialize summary: {0}")]
    Summary(#[from] serde_json::Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SantaError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
