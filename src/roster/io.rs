//! Line-oriented participant file format
//!
//! Each record is a name line, a line of space-separated names that person
//! may not give to (possibly empty), and a blank separator line.

use super::{Exclusions, Roster};
use crate::error::SantaError;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

/// Load a roster from a participant file
pub fn load_roster_from_file<P: AsRef<Path>>(path: P) -> Result<Roster> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read participant file: {}", path.as_ref().display()))?;

    parse_roster_from_string(&content)
        .with_context(|| format!("Failed to parse participant file: {}", path.as_ref().display()))
}

/// Parse a roster from its text representation
pub fn parse_roster_from_string(content: &str) -> Result<Roster> {
    let mut participants = Vec::new();
    let mut exclusions = Exclusions::new();
    let mut lines = content.lines().map(str::trim).peekable();

    loop {
        while lines.next_if(|line| line.is_empty()).is_some() {}

        let Some(name) = lines.next() else { break };
        let exclusion_line = lines.next().unwrap_or_default();
        let excluded: HashSet<String> = exclusion_line
            .split_whitespace()
            .map(str::to_string)
            .collect();

        if exclusions.insert(name.to_string(), excluded).is_some() {
            return Err(SantaError::DuplicateParticipant(name.to_string()).into());
        }
        participants.push(name.to_string());

        // An empty exclusion line doubles as the separator
        if exclusion_line.is_empty() {
            continue;
        }
        if let Some(line) = lines.next() {
            if !line.is_empty() {
                anyhow::bail!(
                    "Expected a blank line after the record for {}, found {:?}",
                    name,
                    line
                );
            }
        }
    }

    if participants.is_empty() {
        anyhow::bail!("Participant file is empty or contains no records");
    }

    Ok(Roster::new(participants, exclusions)?)
}

/// Render a roster in the participant file format
pub fn roster_to_string(roster: &Roster) -> String {
    let mut result = String::new();

    for name in roster.participants() {
        let mut excluded: Vec<&str> = roster
            .excluded_by(name)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        excluded.sort_unstable();

        result.push_str(name);
        result.push('\n');
        result.push_str(&excluded.join(" "));
        result.push_str("\n\n");
    }

    result
}

/// Save a roster to a participant file
pub fn save_roster_to_file<P: AsRef<Path>>(roster: &Roster, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, roster_to_string(roster))
        .with_context(|| format!("Failed to write participant file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Built-in group used when no participant file is given
pub fn builtin_roster() -> Result<Roster> {
    let participants: Vec<String> = ["p1", "p2", "p3"].iter().map(|s| s.to_string()).collect();

    let mut exclusions = Exclusions::new();
    exclusions.insert("p1".into(), HashSet::from(["p2".to_string()]));
    exclusions.insert("p2".into(), HashSet::from(["p3".to_string()]));
    exclusions.insert("p3".into(), HashSet::new());

    Roster::new(participants, exclusions).context("Built-in participant table is invalid")
}
