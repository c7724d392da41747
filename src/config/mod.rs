//! Configuration management for the Secret Santa assigner

pub mod settings;

pub use settings::{CliOverrides, InputConfig, OutputConfig, OutputFormat, SearchConfig, Settings};
