//! SAT feasibility check for the assignment problem

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use constraints::{Clause, ConstraintGenerator};
pub use encoder::{AssignmentEncoder, EncodingStatistics, Feasibility};
pub use solver::{SatSolver, SolverSolution};
pub use variables::{VariableManager, VariableType};
