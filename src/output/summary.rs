//! Summary report written next to the per-participant files

use crate::config::OutputFormat;
use crate::derangement::{Assignment, SearchOutcome};
use crate::roster::Roster;
use anyhow::{Context, Result};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One giver to recipient line of the summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPair {
    pub giver: String,
    pub recipient: String,
}

/// Everything recorded about an accepted run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub pairs: Vec<AssignmentPair>,
    pub participants: usize,
    /// N! as a decimal string; exceeds every machine integer past N = 34
    pub total_permutations: String,
    pub search_time_ms: f64,
    pub failed_searches: u64,
}

impl SummaryReport {
    pub fn new(roster: &Roster, outcome: &SearchOutcome) -> Self {
        Self {
            pairs: outcome
                .assignment
                .pairs(roster)
                .map(|(giver, recipient)| AssignmentPair {
                    giver: giver.to_string(),
                    recipient: recipient.to_string(),
                })
                .collect(),
            participants: roster.len(),
            total_permutations: factorial(roster.len()).to_string(),
            search_time_ms: outcome.elapsed.as_secs_f64() * 1_000.0,
            failed_searches: outcome.failures,
        }
    }

    /// Rebuild the in-memory assignment from the recorded pairs
    pub fn to_assignment(&self, roster: &Roster) -> Option<Assignment> {
        if self.pairs.len() != roster.len() {
            return None;
        }
        Assignment::from_pairs(
            roster,
            self.pairs.iter().map(|p| (p.giver.as_str(), p.recipient.as_str())),
        )
    }

    pub fn to_text(&self) -> String {
        let mut output = String::new();

        for pair in &self.pairs {
            output.push_str(&format!("{} -> {}\n", pair.giver, pair.recipient));
        }
        output.push_str(&format!("\nNumber of people: {}\n", self.participants));
        output.push_str(&format!("Total permutations: {}\n", self.total_permutations));
        output.push_str(&format!("\nGlobal search time: {:.3} ms\n", self.search_time_ms));
        output.push_str(&format!("Number of failed searches: {}\n", self.failed_searches));

        output
    }

    pub fn from_text(content: &str) -> Result<Self> {
        let mut lines = content.lines().map(str::trim);
        let mut pairs = Vec::new();

        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            let (giver, recipient) = line
                .split_once(" -> ")
                .with_context(|| format!("Malformed assignment line: {:?}", line))?;
            pairs.push(AssignmentPair {
                giver: giver.to_string(),
                recipient: recipient.to_string(),
            });
        }

        let mut participants: Option<usize> = None;
        let mut total_permutations: Option<String> = None;
        let mut search_time_ms: Option<f64> = None;
        let mut failed_searches: Option<u64> = None;

        for line in lines.filter(|line| !line.is_empty()) {
            let (key, value) = line
                .split_once(": ")
                .with_context(|| format!("Malformed summary line: {:?}", line))?;
            match key {
                "Number of people" => participants = Some(value.parse()?),
                "Total permutations" => total_permutations = Some(value.to_string()),
                "Global search time" => {
                    search_time_ms = Some(value.trim_end_matches(" ms").parse()?)
                }
                "Number of failed searches" => failed_searches = Some(value.parse()?),
                other => anyhow::bail!("Unknown summary field: {:?}", other),
            }
        }

        Ok(Self {
            pairs,
            participants: participants.context("Summary is missing the participant count")?,
            total_permutations: total_permutations
                .context("Summary is missing the permutation count")?,
            search_time_ms: search_time_ms.context("Summary is missing the search time")?,
            failed_searches: failed_searches
                .context("Summary is missing the failed search count")?,
        })
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn parse(content: &str, format: OutputFormat) -> Result<Self> {
        match format {
            OutputFormat::Text => Self::from_text(content),
            OutputFormat::Json => serde_json::from_str(content).context("Failed to parse summary"),
        }
    }

    /// Read a summary file back from disk
    pub fn load_from_file<P: AsRef<Path>>(path: P, format: OutputFormat) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read summary file: {}", path.as_ref().display()))?;
        Self::parse(&content, format)
            .with_context(|| format!("Failed to parse summary file: {}", path.as_ref().display()))
    }
}

/// n! with arbitrary precision
pub fn factorial(n: usize) -> BigUint {
    (1..=n as u64).fold(BigUint::from(1u32), |acc, k| acc * BigUint::from(k))
}
