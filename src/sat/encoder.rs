//! SAT encoding of the constrained assignment problem
//!
//! Used as a feasibility pre-check before the randomized search: it proves
//! that some admissible assignment exists, or that none does.

use super::{ConstraintGenerator, SatSolver, VariableManager, VariableType};
use crate::derangement::{verify_assignment, Assignment};
use crate::roster::Roster;
use anyhow::{Context, Result};
use std::fmt;

/// Answer of the feasibility check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    /// A witness assignment satisfying every constraint
    Feasible(Assignment),
    Infeasible,
}

/// Encodes a roster into CNF and solves it with CaDiCaL
pub struct AssignmentEncoder<'a> {
    roster: &'a Roster,
    variables: VariableManager,
}

impl<'a> AssignmentEncoder<'a> {
    pub fn new(roster: &'a Roster) -> Self {
        Self {
            roster,
            variables: VariableManager::new(roster),
        }
    }

    /// Decide whether any admissible assignment exists.
    ///
    /// A witness is only returned once it has passed the verifier.
    pub fn check_feasibility(&self) -> Result<Feasibility> {
        if self.roster.len() < 2 {
            return Ok(Feasibility::Infeasible);
        }

        let clauses = ConstraintGenerator::new(&self.variables).generate_all_constraints();
        if clauses.iter().any(|clause| clause.is_empty()) {
            return Ok(Feasibility::Infeasible);
        }

        let mut solver = SatSolver::new();
        solver.add_clauses(&clauses)
            .context("Failed to load assignment constraints")?;

        match solver.solve()? {
            Some(solution) => {
                let mut recipients = vec![usize::MAX; self.roster.len()];
                for (&var, &value) in &solution.assignment {
                    if !value {
                        continue;
                    }
                    if let Some(VariableType::Pair { giver, recipient }) =
                        self.variables.decode(var)
                    {
                        recipients[giver] = recipient;
                    }
                }
                let witness = Assignment::new(recipients);
                verify_assignment(witness.as_slice(), self.roster)
                    .context("SAT witness failed verification")?;
                Ok(Feasibility::Feasible(witness))
            }
            None => Ok(Feasibility::Infeasible),
        }
    }

    /// Size of the encoding
    pub fn statistics(&self) -> EncodingStatistics {
        let clauses = ConstraintGenerator::new(&self.variables).generate_all_constraints();
        EncodingStatistics {
            participants: self.roster.len(),
            variables: self.variables.variable_count(),
            clauses: clauses.len(),
        }
    }
}

/// Statistics about the CNF encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingStatistics {
    pub participants: usize,
    pub variables: usize,
    pub clauses: usize,
}

impl fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Encoding Statistics:")?;
        writeln!(f, "  Participants: {}", self.participants)?;
        writeln!(f, "  Variables: {}", self.variables)?;
        writeln!(f, "  Clauses: {}", self.clauses)?;
        Ok(())
    }
}
