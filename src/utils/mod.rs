//! Console output helpers

pub mod display;

pub use display::{AssignmentFormatter, Color, ColorOutput};
