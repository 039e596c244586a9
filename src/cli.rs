//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// score-exporter - aggregate student homework scores into an Excel report
///
/// Scans per-server submission logs and score files, merges them into one
/// row per student, applies competition overrides from extra.yaml, and
/// writes a formatted workbook. Running with no flags performs the whole
/// pipeline with the course defaults.
///
/// Examples:
///   score-exporter
///   score-exporter --base-dir docs/public/score --output 成绩.xlsx
///   score-exporter --dry-run --verbose
///   score-exporter --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Score directory root (one subdirectory per server)
    ///
    /// Defaults to the path in .scores.toml, or docs/public/score.
    #[arg(short, long, value_name = "DIR", env = "SCORE_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Output workbook path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .scores.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Collect and print the roster without writing a workbook
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .scores.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // A missing default base dir just yields an empty roster, but an
        // explicitly passed one that doesn't exist is a caller mistake.
        if let Some(ref base_dir) = self.base_dir {
            if !base_dir.exists() {
                return Err(format!(
                    "Score directory does not exist: {}",
                    base_dir.display()
                ));
            }
            if !base_dir.is_dir() {
                return Err(format!(
                    "Score path is not a directory: {}",
                    base_dir.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
