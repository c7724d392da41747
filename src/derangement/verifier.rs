//! Independent re-check of a completed candidate

use crate::roster::Roster;
use thiserror::Error;

/// First invariant a rejected candidate breaks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("assignment has {actual} entries, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("giver {giver} maps to out-of-range index {recipient}")]
    OutOfRange { giver: usize, recipient: usize },

    #[error("recipient {recipient} is assigned more than once")]
    DuplicateRecipient { recipient: usize },

    #[error("participant {giver} is assigned to themselves")]
    SelfAssignment { giver: usize },

    #[error("participant {giver} may not give to {recipient}")]
    Excluded { giver: usize, recipient: usize },

    #[error("participants {first} and {second} form a 2-cycle")]
    TwoCycle { first: usize, second: usize },
}

/// Check a candidate against every global invariant.
///
/// Runs the bijection check first, then the per-position admissibility
/// check, then the 2-cycle check, and stops at the first failure.
pub fn verify_assignment(assignment: &[usize], roster: &Roster) -> Result<(), Violation> {
    check_bijection(assignment, roster.len())?;

    for (giver, &recipient) in assignment.iter().enumerate() {
        if giver == recipient {
            return Err(Violation::SelfAssignment { giver });
        }
        if !roster.can_give(giver, recipient) {
            return Err(Violation::Excluded { giver, recipient });
        }
    }

    for (giver, &recipient) in assignment.iter().enumerate() {
        if assignment[recipient] == giver {
            return Err(Violation::TwoCycle {
                first: giver.min(recipient),
                second: giver.max(recipient),
            });
        }
    }

    Ok(())
}

fn check_bijection(assignment: &[usize], n: usize) -> Result<(), Violation> {
    if assignment.len() != n {
        return Err(Violation::LengthMismatch {
            expected: n,
            actual: assignment.len(),
        });
    }

    let mut seen = vec![false; n];
    for (giver, &recipient) in assignment.iter().enumerate() {
        match seen.get_mut(recipient) {
            None => return Err(Violation::OutOfRange { giver, recipient }),
            Some(true) => return Err(Violation::DuplicateRecipient { recipient }),
            Some(slot) => *slot = true,
        }
    }

    // n distinct in-range recipients cover every participant
    Ok(())
}
