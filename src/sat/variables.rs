//! Variable management for the assignment SAT encoding

use crate::roster::Roster;
use std::collections::HashMap;

/// Types of variables used in the SAT encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// Giver `giver` gives to `recipient`
    Pair { giver: usize, recipient: usize },
}

/// Manages SAT variables and their mapping to integers.
///
/// Only admissible pairs get a variable; an inadmissible pair is simply
/// absent from every clause.
#[derive(Debug)]
pub struct VariableManager {
    variable_map: HashMap<VariableType, i32>,
    reverse_map: Vec<VariableType>,
    participants: usize,
}

impl VariableManager {
    /// Allocate one variable per admissible (giver, recipient) pair
    pub fn new(roster: &Roster) -> Self {
        let n = roster.len();
        let mut manager = Self {
            variable_map: HashMap::new(),
            reverse_map: Vec::new(),
            participants: n,
        };

        for giver in 0..n {
            for recipient in 0..n {
                if roster.can_give(giver, recipient) {
                    manager.allocate(VariableType::Pair { giver, recipient });
                }
            }
        }

        manager
    }

    fn allocate(&mut self, var_type: VariableType) -> i32 {
        // SAT variables start from 1
        let id = self.reverse_map.len() as i32 + 1;
        self.variable_map.insert(var_type, id);
        self.reverse_map.push(var_type);
        id
    }

    /// Variable for a pair, if the pair is admissible
    pub fn pair_variable(&self, giver: usize, recipient: usize) -> Option<i32> {
        self.variable_map
            .get(&VariableType::Pair { giver, recipient })
            .copied()
    }

    /// Decode a variable ID back into its pair
    pub fn decode(&self, var: i32) -> Option<VariableType> {
        let index = usize::try_from(var).ok()?.checked_sub(1)?;
        self.reverse_map.get(index).copied()
    }

    /// Variables for every admissible recipient of a giver
    pub fn giver_variables(&self, giver: usize) -> Vec<i32> {
        (0..self.participants)
            .filter_map(|recipient| self.pair_variable(giver, recipient))
            .collect()
    }

    /// Variables for every admissible giver of a recipient
    pub fn recipient_variables(&self, recipient: usize) -> Vec<i32> {
        (0..self.participants)
            .filter_map(|giver| self.pair_variable(giver, recipient))
            .collect()
    }

    pub fn variable_count(&self) -> usize {
        self.reverse_map.len()
    }

    pub fn participants(&self) -> usize {
        self.participants
    }
}
