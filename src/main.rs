//! Command line entry point for the Secret Santa assigner

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use secret_santa::{
    config::{CliOverrides, OutputFormat, Settings},
    utils::{AssignmentFormatter, ColorOutput},
    SecretSantaDraw,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "secret_santa")]
#[command(about = "Assigns every participant a Secret Santa recipient")]
#[command(version = "0.1.0")]
#[command(after_help = "Usage forms:\n  \
    secret_santa                        built-in participants, write to the current directory\n  \
    secret_santa <OUTPUT_DIR>           built-in participants, write to a new directory\n  \
    secret_santa <INPUT_FILE> <OUTPUT_DIR>  participants from a file, write to a new directory")]
struct Cli {
    /// Output directory, or the participant file when OUTPUT_DIR follows
    #[arg(value_name = "INPUT_FILE|OUTPUT_DIR")]
    first: Option<PathBuf>,

    /// Output directory (must not exist yet)
    #[arg(value_name = "OUTPUT_DIR")]
    second: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,

    /// Time budget for a single attempt, in milliseconds
    #[arg(long)]
    attempt_timeout_ms: Option<u64>,

    /// Time budget for the whole search, in seconds
    #[arg(long)]
    global_timeout_secs: Option<u64>,

    /// Summary file format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Prove an assignment exists before searching
    #[arg(long)]
    feasibility_check: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Map the positional arguments onto (participant file, output directory)
    fn paths(&self) -> (Option<PathBuf>, Option<PathBuf>) {
        match (&self.first, &self.second) {
            (Some(input), Some(output)) => (Some(input.clone()), Some(output.clone())),
            (Some(output), None) => (None, Some(output.clone())),
            _ => (None, None),
        }
    }
}

/// Only `--version` counts as success; help and usage errors fail
fn parse_exit_code(kind: ErrorKind) -> ExitCode {
    match kind {
        ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return parse_exit_code(err.kind());
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ColorOutput::error(&format!("Error: {:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Settings::default(),
    };

    let (participants_file, output_dir) = cli.paths();
    settings.merge_with_cli(&CliOverrides {
        participants_file,
        output_dir,
        format: cli.format,
        seed: cli.seed,
        attempt_timeout_ms: cli.attempt_timeout_ms,
        global_timeout_secs: cli.global_timeout_secs,
        feasibility_check: cli.feasibility_check,
    });

    settings.validate().context("Configuration validation failed")?;

    let draw = SecretSantaDraw::new(settings)?.verbose(cli.verbose);

    if cli.verbose {
        let search = &draw.settings().search;
        println!("Configuration:");
        println!("  Attempt timeout: {} ms", search.attempt_timeout_ms);
        println!("  Global timeout: {} s", search.global_timeout_secs);
        match search.seed {
            Some(seed) => println!("  Seed: {}", seed),
            None => println!("  Seed: from clock"),
        }
        println!("  Output dir: {}", draw.sink().directory().display());
        println!();
        println!("{}", AssignmentFormatter::format_roster(draw.roster()));
        if draw.settings().search.feasibility_check {
            println!("{}", draw.encoding_statistics());
        }
    }

    println!("{}", ColorOutput::info("Searching for an assignment..."));
    let outcome = draw.search()?;

    let found = format!(
        "Found an assignment after {} attempt(s) in {:.3} ms",
        outcome.attempts,
        outcome.elapsed.as_secs_f64() * 1_000.0
    );
    println!("{}", ColorOutput::success(&found));

    if cli.verbose {
        println!("\n{}", AssignmentFormatter::format_search_summary(&outcome, draw.roster()));
    }

    let summary = draw.write(&outcome)?;
    println!(
        "Wrote {} participant files to {}",
        draw.roster().len(),
        draw.sink().directory().display()
    );
    println!("Summary: {}", summary.display());
    println!("{}", ColorOutput::success("DONE!"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["secret_santa"]).unwrap();
        assert_eq!(cli.paths(), (None, None));

        let cli = Cli::try_parse_from(["secret_santa", "out"]).unwrap();
        assert_eq!(cli.paths(), (None, Some(PathBuf::from("out"))));

        let cli =
            Cli::try_parse_from(["secret_santa", "people.txt", "out", "--seed", "4"]).unwrap();
        assert_eq!(
            cli.paths(),
            (Some(PathBuf::from("people.txt")), Some(PathBuf::from("out")))
        );
        assert_eq!(cli.seed, Some(4));
    }

    #[test]
    fn test_bad_arguments_are_errors() {
        assert!(Cli::try_parse_from(["secret_santa", "a", "b", "c"]).is_err());

        let help = Cli::try_parse_from(["secret_santa", "--help"]).unwrap_err();
        assert_eq!(help.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_parse_exit_codes() {
        let help = Cli::try_parse_from(["secret_santa", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(help.kind()), ExitCode::FAILURE);

        let extra = Cli::try_parse_from(["secret_santa", "a", "b", "c"]).unwrap_err();
        assert_eq!(parse_exit_code(extra.kind()), ExitCode::FAILURE);

        let version = Cli::try_parse_from(["secret_santa", "--version"]).unwrap_err();
        assert_eq!(version.kind(), ErrorKind::DisplayVersion);
        assert_eq!(parse_exit_code(version.kind()), ExitCode::SUCCESS);
    }

    #[test]
    fn test_run_end_to_end() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("people.txt");
        std::fs::write(&input, "ann\nbob\n\nbob\n\n\ncid\n\n\ndee\nann\n\n").unwrap();
        let out = temp_dir.path().join("out");

        let cli = Cli::try_parse_from([
            OsStr::new("secret_santa"),
            input.as_os_str(),
            out.as_os_str(),
            OsStr::new("--seed"),
            OsStr::new("9"),
            OsStr::new("--attempt-timeout-ms"),
            OsStr::new("5"),
            OsStr::new("--global-timeout-secs"),
            OsStr::new("10"),
        ])
        .unwrap();
        run(cli).unwrap();

        for name in ["ann", "bob", "cid", "dee"] {
            assert!(out.join(name).exists());
        }
        assert!(out.join("details.txt").exists());
    }

    #[test]
    fn test_run_refuses_existing_directory() {
        let temp_dir = tempdir().unwrap();
        let cli = Cli::try_parse_from([OsStr::new("secret_santa"), temp_dir.path().as_os_str()])
            .unwrap();
        assert!(run(cli).is_err());
    }
}
