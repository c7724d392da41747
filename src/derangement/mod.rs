//! Constrained random derangement search
//!
//! A [`generator`] builds random candidates, a [`verifier`] re-checks them
//! and the [`search`] loop retries until one is accepted or time runs out.

pub mod assignment;
pub mod generator;
pub mod search;
pub mod verifier;

pub use assignment::Assignment;
pub use generator::{generate_candidate, AttemptFailure};
pub use search::{seeded_rng, DerangementSearch, SearchOutcome};
pub use verifier::{verify_assignment, Violation};
