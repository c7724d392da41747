//! Constraint generation for the assignment SAT encoding

use super::VariableManager;
use itertools::Itertools;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }
}

/// Generates the bijection, exclusion and 2-cycle constraints.
///
/// Exclusions and self-assignment are handled by never creating the
/// variable, so only the structural constraints need clauses.
pub struct ConstraintGenerator<'a> {
    variables: &'a VariableManager,
}

impl<'a> ConstraintGenerator<'a> {
    pub fn new(variables: &'a VariableManager) -> Self {
        Self { variables }
    }

    /// Generate all constraints; an empty clause means some giver or
    /// recipient has no admissible partner at all
    pub fn generate_all_constraints(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();

        for p in 0..self.variables.participants() {
            clauses.extend(Self::exactly_one(&self.variables.giver_variables(p)));
            clauses.extend(Self::exactly_one(&self.variables.recipient_variables(p)));
        }
        clauses.extend(self.generate_no_two_cycle_constraints());

        clauses
    }

    /// At least one literal true, and pairwise at most one
    fn exactly_one(vars: &[i32]) -> Vec<Clause> {
        let mut clauses = vec![Clause::new(vars.to_vec())];
        clauses.extend(
            vars.iter()
                .tuple_combinations()
                .map(|(&a, &b)| Clause::binary(-a, -b)),
        );
        clauses
    }

    /// ¬x(i,j) ∨ ¬x(j,i) wherever both directions are admissible
    fn generate_no_two_cycle_constraints(&self) -> Vec<Clause> {
        let n = self.variables.participants();
        (0..n)
            .tuple_combinations()
            .filter_map(|(i, j)| {
                let forward = self.variables.pair_variable(i, j)?;
                let backward = self.variables.pair_variable(j, i)?;
                Some(Clause::binary(-forward, -backward))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{builtin_roster, Exclusions, Roster};

    #[test]
    fn test_exactly_one() {
        let clauses = ConstraintGenerator::exactly_one(&[1, 2, 3]);
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[0], Clause::new(vec![1, 2, 3]));
        assert!(clauses.contains(&Clause::binary(-1, -3)));
    }

    #[test]
    fn test_two_cycle_clauses() {
        let roster = Roster::with_partial_exclusions(
            vec!["a".into(), "b".into(), "c".into()],
            Exclusions::new(),
        )
        .unwrap();
        let vars = VariableManager::new(&roster);
        let generator = ConstraintGenerator::new(&vars);

        assert_eq!(generator.generate_no_two_cycle_constraints().len(), 3);
    }

    #[test]
    fn test_builtin_constraints_are_non_empty() {
        let roster = builtin_roster().unwrap();
        let vars = VariableManager::new(&roster);
        let clauses = ConstraintGenerator::new(&vars).generate_all_constraints();

        assert!(!clauses.is_empty());
        assert!(clauses.iter().all(|c| !c.is_empty()));
    }
}
