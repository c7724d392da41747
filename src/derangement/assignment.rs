//! Giver to recipient assignment

use crate::roster::Roster;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position `i` holds the index of the participant that participant `i`
/// gives to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn new(recipients: Vec<usize>) -> Self {
        Self(recipients)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Named (giver, recipient) pairs in canonical participant order
    pub fn pairs<'a>(
        &'a self,
        roster: &'a Roster,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.0
            .iter()
            .enumerate()
            .map(move |(giver, &recipient)| (roster.name(giver), roster.name(recipient)))
    }

    /// Rebuild an assignment from named pairs, in roster order
    pub fn from_pairs<'p, I>(roster: &Roster, pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let mut recipients = vec![None; roster.len()];
        for (giver, recipient) in pairs {
            let slot = recipients.get_mut(roster.index_of(giver)?)?;
            if slot.is_some() {
                return None;
            }
            *slot = Some(roster.index_of(recipient)?);
        }
        recipients.into_iter().collect::<Option<Vec<_>>>().map(Self)
    }
}

impl From<Vec<usize>> for Assignment {
    fn from(recipients: Vec<usize>) -> Self {
        Self(recipients)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (giver, recipient) in self.0.iter().enumerate() {
            if giver > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}->{}", giver, recipient)?;
        }
        Ok(())
    }
}
