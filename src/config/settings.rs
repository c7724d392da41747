//! Configuration settings for the Secret Santa assigner

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Budget for a single generator attempt
    pub attempt_timeout_ms: u64,
    /// Budget for the whole retry loop
    pub global_timeout_secs: u64,
    /// Fixed seed for reproducible runs; seeded from the clock when absent
    pub seed: Option<u64>,
    /// Prove an assignment exists with the SAT backend before searching
    pub feasibility_check: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Participant file; the built-in table is used when absent
    pub participants_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Target directory; the current working directory when absent
    pub output_directory: Option<PathBuf>,
    /// Summary file name; derived from the format when absent
    pub summary_file: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            attempt_timeout_ms: 100,
            global_timeout_secs: 60,
            seed: None,
            feasibility_check: false,
        }
    }
}

impl SearchConfig {
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn global_timeout(&self) -> Duration {
        Duration::from_secs(self.global_timeout_secs)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_directory: None,
            summary_file: None,
        }
    }
}

impl OutputConfig {
    /// Effective summary file name
    pub fn summary_file_name(&self) -> String {
        match (&self.summary_file, self.format) {
            (Some(name), _) => name.clone(),
            (None, OutputFormat::Text) => "details.txt".to_string(),
            (None, OutputFormat::Json) => "details.json".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.search.attempt_timeout_ms == 0 {
            anyhow::bail!("Attempt timeout must be positive");
        }

        if self.search.global_timeout_secs == 0 {
            anyhow::bail!("Global timeout must be positive");
        }

        if self.search.global_timeout() < self.search.attempt_timeout() {
            anyhow::bail!("Global timeout must not be shorter than the attempt timeout");
        }

        let summary = self.output.summary_file_name();
        if summary.is_empty() || summary.contains('/') || summary.contains('\\') {
            anyhow::bail!("Summary file name must be a plain file name: {:?}", summary);
        }

        if let Some(ref file) = self.input.participants_file {
            if !file.exists() {
                anyhow::bail!("Participant file does not exist: {}", file.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref participants_file) = cli_overrides.participants_file {
            self.input.participants_file = Some(participants_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = Some(output_dir.clone());
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(seed) = cli_overrides.seed {
            self.search.seed = Some(seed);
        }
        if let Some(ms) = cli_overrides.attempt_timeout_ms {
            self.search.attempt_timeout_ms = ms;
        }
        if let Some(secs) = cli_overrides.global_timeout_secs {
            self.search.global_timeout_secs = secs;
        }
        if cli_overrides.feasibility_check {
            self.search.feasibility_check = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub participants_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub seed: Option<u64>,
    pub attempt_timeout_ms: Option<u64>,
    pub global_timeout_secs: Option<u64>,
    pub feasibility_check: bool,
}
