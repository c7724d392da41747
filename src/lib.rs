//! Secret Santa assigner
//!
//! Gives every member of a group exactly one recipient from the same group,
//! with no self-assignment, no 2-cycles and no excluded pairs, using a
//! constrained random derangement search with per-attempt and global
//! timeouts.

pub mod config;
pub mod derangement;
pub mod draw;
pub mod error;
pub mod output;
pub mod roster;
pub mod sat;
pub mod utils;

pub use config::Settings;
pub use derangement::{Assignment, SearchOutcome};
pub use draw::{draw_secret_santas, SecretSantaDraw};
pub use error::SantaError;
pub use roster::Roster;
