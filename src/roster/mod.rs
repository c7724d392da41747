//! Participants, exclusion sets and the participant file format

pub mod io;
pub mod participants;

pub use io::{builtin_roster, load_roster_from_file, parse_roster_from_string, save_roster_to_file};
pub use participants::{Exclusions, Roster};
