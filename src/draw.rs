//! End-to-end draw: load participants, search, write the result

use crate::config::Settings;
use crate::derangement::{seeded_rng, DerangementSearch, SearchOutcome};
use crate::error::SantaError;
use crate::output::OutputSink;
use crate::roster::{builtin_roster, load_roster_from_file, Roster};
use crate::sat::{AssignmentEncoder, EncodingStatistics, Feasibility};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// A fully validated draw, ready to search
pub struct SecretSantaDraw {
    settings: Settings,
    roster: Roster,
    sink: OutputSink,
    verbose: bool,
}

impl SecretSantaDraw {
    /// Load participants from the configured file, or the built-in table
    pub fn new(settings: Settings) -> Result<Self> {
        let roster = match &settings.input.participants_file {
            Some(path) => load_roster_from_file(path)?,
            None => builtin_roster()?,
        };
        Self::with_roster(settings, roster)
    }

    /// Create a draw with an explicit roster (useful for testing).
    ///
    /// Every configuration and environment check that does not need a
    /// result runs here, before any search attempt.
    pub fn with_roster(settings: Settings, roster: Roster) -> Result<Self> {
        if roster.len() < 2 {
            return Err(SantaError::InsufficientParticipants(roster.len()).into());
        }

        let sink = OutputSink::from_config(&settings.output)?;
        sink.check(&roster)?;

        Ok(Self {
            settings,
            roster,
            sink,
            verbose: false,
        })
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Prove with the SAT backend whether any valid assignment exists
    pub fn check_feasibility(&self) -> Result<Feasibility> {
        AssignmentEncoder::new(&self.roster)
            .check_feasibility()
            .context("Feasibility check failed")
    }

    pub fn encoding_statistics(&self) -> EncodingStatistics {
        AssignmentEncoder::new(&self.roster).statistics()
    }

    /// Run the retry loop, after the optional feasibility check
    pub fn search(&self) -> Result<SearchOutcome> {
        if self.settings.search.feasibility_check {
            if let Feasibility::Infeasible = self.check_feasibility()? {
                return Err(SantaError::Infeasible.into());
            }
        }

        let mut rng = seeded_rng(self.settings.search.seed);
        let outcome = DerangementSearch::new(&self.roster, &self.settings.search)
            .verbose(self.verbose)
            .run(&mut rng)?;
        Ok(outcome)
    }

    /// Write the accepted assignment; returns the summary path
    pub fn write(&self, outcome: &SearchOutcome) -> Result<PathBuf> {
        Ok(self.sink.write(&self.roster, outcome)?)
    }
}

/// Search and write in one go
pub fn draw_secret_santas(settings: Settings) -> Result<(SearchOutcome, PathBuf)> {
    let draw = SecretSantaDraw::new(settings)?;
    let outcome = draw.search()?;
    let summary = draw.write(&outcome)?;
    Ok((outcome, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derangement::verify_assignment;
    use crate::roster::Exclusions;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn settings_for(dir: PathBuf) -> Settings {
        let mut settings = Settings::default();
        settings.output.output_directory = Some(dir);
        settings.search.seed = Some(17);
        settings.search.attempt_timeout_ms = 10;
        settings.search.global_timeout_secs = 1;
        settings
    }

    #[test]
    fn test_builtin_draw_writes_cyclic_answer() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("santas");

        let (outcome, summary) = draw_secret_santas(settings_for(out.clone())).unwrap();

        assert_eq!(outcome.assignment.as_slice(), [2, 0, 1]);
        assert_eq!(std::fs::read_to_string(out.join("p1")).unwrap(), "p3\n");
        assert_eq!(std::fs::read_to_string(out.join("p3")).unwrap(), "p2\n");
        assert_eq!(std::fs::read_to_string(out.join("p2")).unwrap(), "p1\n");
        assert!(summary.ends_with("details.txt"));
    }

    #[test]
    fn test_summary_reproduces_assignment() {
        let temp_dir = tempdir().unwrap();
        let names = (0..9).map(|i| format!("p{}", i)).collect();
        let roster = Roster::with_partial_exclusions(names, Exclusions::new()).unwrap();

        let settings = settings_for(temp_dir.path().join("out"));
        let draw = SecretSantaDraw::with_roster(settings, roster).unwrap();
        let outcome = draw.search().unwrap();
        draw.write(&outcome).unwrap();

        let reloaded = draw.sink().load_assignment(draw.roster()).unwrap();
        assert_eq!(reloaded, outcome.assignment);
        assert_eq!(verify_assignment(reloaded.as_slice(), draw.roster()), Ok(()));
    }

    #[test]
    fn test_two_participants_report_exhaustion_without_files() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("pair");
        let roster =
            Roster::with_partial_exclusions(vec!["a".into(), "b".into()], Exclusions::new())
                .unwrap();

        let draw = SecretSantaDraw::with_roster(settings_for(out.clone()), roster).unwrap();
        let err = draw.search().unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SantaError>(),
            Some(SantaError::SearchExhausted { .. })
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_feasibility_check_short_circuits() {
        let temp_dir = tempdir().unwrap();
        let roster =
            Roster::with_partial_exclusions(vec!["a".into(), "b".into()], Exclusions::new())
                .unwrap();

        let mut settings = settings_for(temp_dir.path().join("pair"));
        settings.search.feasibility_check = true;
        let draw = SecretSantaDraw::with_roster(settings, roster).unwrap();

        let err = draw.search().unwrap_err();
        assert!(matches!(err.downcast_ref::<SantaError>(), Some(SantaError::Infeasible)));
    }

    #[test]
    fn test_feasibility_check_passes_feasible_roster() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("checked");
        let mut exclusions = Exclusions::new();
        exclusions.insert("p0".into(), HashSet::from(["p1".to_string(), "p2".to_string()]));
        exclusions.insert("p3".into(), HashSet::from(["p0".to_string()]));
        let names = (0..6).map(|i| format!("p{}", i)).collect();
        let roster = Roster::with_partial_exclusions(names, exclusions).unwrap();

        let mut settings = settings_for(out.clone());
        settings.search.feasibility_check = true;
        let draw = SecretSantaDraw::with_roster(settings, roster).unwrap();

        match draw.check_feasibility().unwrap() {
            Feasibility::Feasible(witness) => {
                assert_eq!(verify_assignment(witness.as_slice(), draw.roster()), Ok(()));
            }
            Feasibility::Infeasible => panic!("expected a witness"),
        }

        let outcome = draw.search().unwrap();
        assert_eq!(verify_assignment(outcome.assignment.as_slice(), draw.roster()), Ok(()));
        draw.write(&outcome).unwrap();
        assert!(out.join("details.txt").exists());
    }

    #[test]
    fn test_duplicate_name_fails_before_search() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("people.txt");
        std::fs::write(&input, "a\n\n\nb\n\n\na\n\n").unwrap();
        let out = temp_dir.path().join("out");

        let mut settings = settings_for(out.clone());
        settings.input.participants_file = Some(input);

        let err = SecretSantaDraw::new(settings).err().unwrap();
        assert!(err.chain().any(|cause| matches!(
            cause.downcast_ref::<SantaError>(),
            Some(SantaError::DuplicateParticipant(_))
        )));
        assert!(!out.exists());
    }

    #[test]
    fn test_existing_output_directory_fails_before_search() {
        let temp_dir = tempdir().unwrap();
        let err = SecretSantaDraw::new(settings_for(temp_dir.path().to_path_buf())).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<SantaError>(),
            Some(SantaError::OutputDirectoryExists(_))
        ));
    }

    #[test]
    fn test_single_participant_is_rejected() {
        let temp_dir = tempdir().unwrap();
        let roster =
            Roster::with_partial_exclusions(vec!["solo".into()], Exclusions::new()).unwrap();
        let settings = settings_for(temp_dir.path().join("out"));
        let result = SecretSantaDraw::with_roster(settings, roster);
        assert!(result.is_err());
    }
}
