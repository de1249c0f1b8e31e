//! Command line argument parsing for the rbo CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// rbo - compare two ranked lists
#[derive(Parser, Debug, Clone)]
#[command(name = "rbo")]
#[command(about = "Rank-biased overlap and related similarity measures for ranked lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct RboArgs {
    /// Increase verbosity (-v: progress, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl RboArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Any `-v` turns on per-depth progress.
    pub fn progress_enabled(&self) -> bool {
        self.verbosity() >= 2
    }

    /// Log filter for the effective verbosity level.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity() {
            0 => LevelFilter::Error, // Quiet mode
            1 => LevelFilter::Warn,  // Default
            2 => LevelFilter::Info,  // -v: progress
            _ => LevelFilter::Debug, // -vv and up
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Bounded rank-biased overlap (average overlap when p = 1)
    Rbo(RboCommandArgs),

    /// Extrapolated rank-biased overlap for lists of unequal length
    #[command(name = "rbo-ext")]
    RboExt(RboExtArgs),

    /// Share of the RBO weight carried by the first d ranks
    #[command(name = "top-weightness")]
    TopWeightness(TopWeightnessArgs),

    /// Kendall's tau-b over the shared elements
    Kendall(KendallArgs),

    /// Compute every measure at once
    Compare(CompareArgs),
}

/// The two ranked lists to compare
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// First ranked list (comma-separated)
    #[arg(value_name = "S")]
    pub s: String,

    /// Second ranked list (comma-separated)
    #[arg(value_name = "T")]
    pub t: String,

    /// Treat every character of S and T as one item instead of splitting on commas
    #[arg(long)]
    pub chars: bool,
}

impl ListArgs {
    /// Split both lists into items.
    pub fn parse_lists(&self) -> (Vec<String>, Vec<String>) {
        (self.split(&self.s), self.split(&self.t))
    }

    fn split(&self, list: &str) -> Vec<String> {
        if self.chars {
            return list.chars().map(String::from).collect();
        }
        if list.trim().is_empty() {
            return Vec::new();
        }
        list.split(',').map(|item| item.trim().to_string()).collect()
    }
}

/// Arguments for the bounded RBO
#[derive(Parser, Debug, Clone)]
pub struct RboCommandArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Evaluation depth (default: length of the shorter list)
    #[arg(short = 'k', long)]
    pub depth: Option<usize>,

    /// Weight parameter in (0, 1), or 1.0 for unweighted average overlap
    #[arg(short, long, default_value = "1.0")]
    pub p: f64,

    /// Extrapolate beyond the evaluation depth
    #[arg(short, long)]
    pub extrapolate: bool,
}

/// Arguments for the extrapolated RBO
#[derive(Parser, Debug, Clone)]
pub struct RboExtArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Weight parameter in (0, 1)
    #[arg(short, long, default_value = "0.98")]
    pub p: f64,
}

/// Arguments for top-weightness
#[derive(Parser, Debug, Clone)]
pub struct TopWeightnessArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Weight parameter in (0, 1)
    #[arg(short, long)]
    pub p: f64,

    /// Evaluation depth (default: length of the shorter list)
    #[arg(short, long)]
    pub depth: Option<usize>,
}

/// Arguments for Kendall's tau
#[derive(Parser, Debug, Clone)]
pub struct KendallArgs {
    #[command(flatten)]
    pub lists: ListArgs,
}

/// Arguments for the full comparison report
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub lists: ListArgs,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
