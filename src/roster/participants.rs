//! Participant set and exclusion map

use crate::error::SantaError;
use std::collections::{HashMap, HashSet};

/// Exclusion map: giver name to the names they must not give to
pub type Exclusions = HashMap<String, HashSet<String>>;

/// Validated group of participants with their exclusion sets.
///
/// Participant order defines the canonical indexing used by the generator,
/// the verifier and the output sink.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<String>,
    exclusions: Exclusions,
    blocked: Vec<Vec<bool>>,
}

impl Roster {
    /// Build a roster, checking every configuration invariant before any search
    pub fn new(participants: Vec<String>, exclusions: Exclusions) -> Result<Self, SantaError> {
        let blocked = {
            let mut index: HashMap<&str, usize> = HashMap::with_capacity(participants.len());
            for (i, name) in participants.iter().enumerate() {
                validate_name(name)?;
                if index.insert(name.as_str(), i).is_some() {
                    return Err(SantaError::DuplicateParticipant(name.clone()));
                }
            }

            for (giver, excluded) in &exclusions {
                if !index.contains_key(giver.as_str()) {
                    return Err(SantaError::UnknownGiver(giver.clone()));
                }
                let unknown = excluded.iter().find(|name| !index.contains_key(name.as_str()));
                if let Some(unknown) = unknown {
                    return Err(SantaError::UnknownExclusion {
                        giver: giver.clone(),
                        unknown: unknown.clone(),
                    });
                }
            }

            let missing = participants.iter().find(|name| !exclusions.contains_key(*name));
            if let Some(missing) = missing {
                return Err(SantaError::MissingExclusions(missing.clone()));
            }

            let n = participants.len();
            let mut blocked = vec![vec![false; n]; n];
            for (giver, excluded) in &exclusions {
                let i = index[giver.as_str()];
                for name in excluded {
                    blocked[i][index[name.as_str()]] = true;
                }
            }
            blocked
        };

        Ok(Self {
            participants,
            exclusions,
            blocked,
        })
    }

    /// Build a roster where every participant gets an empty exclusion set
    /// unless one is listed
    pub fn with_partial_exclusions(
        participants: Vec<String>,
        mut exclusions: Exclusions,
    ) -> Result<Self, SantaError> {
        for name in &participants {
            exclusions.entry(name.clone()).or_default();
        }
        Self::new(participants, exclusions)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn name(&self, index: usize) -> &str {
        &self.participants[index]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.participants.iter().position(|p| p == name)
    }

    pub fn exclusions(&self) -> &Exclusions {
        &self.exclusions
    }

    /// Exclusion set of one participant, `None` if the name is unknown
    pub fn excluded_by(&self, name: &str) -> Option<&HashSet<String>> {
        self.exclusions.get(name)
    }

    /// Admissibility predicate shared by the generator and the verifier:
    /// both indices in range, no self-assignment, pair not excluded.
    #[inline]
    pub fn can_give(&self, giver: usize, recipient: usize) -> bool {
        let n = self.len();
        giver < n && recipient < n && giver != recipient && !self.blocked[giver][recipient]
    }
}

fn validate_name(name: &str) -> Result<(), SantaError> {
    let reason = if name.is_empty() {
        Some("name is empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("name contains whitespace")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else if name == "." || name == ".." {
        Some("name is a reserved path component")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SantaError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
