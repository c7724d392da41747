//! Output sink for accepted assignments

pub mod sink;
pub mod summary;

pub use sink::{OutputSink, OutputTarget};
pub use summary::{factorial, AssignmentPair, SummaryReport};
