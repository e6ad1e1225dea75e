//! CLI argument definitions using clap.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use leapline::analysis::{GroupKey, LeapFilter};
use leapline::{DEFAULT_END, DEFAULT_START, OutputFormat};

use crate::logging::LogFormat;

/// Leapline: classify, normalize and summarize leap years in tabular data
#[derive(Parser)]
#[command(name = "leapline")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format
    #[arg(long, default_value = "compact", global = true)]
    pub log_format: LogFormat,
}

/// Where a data command reads its table from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to a CSV/TSV file (default: built-in sample years)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// First sample year when no file is given
    #[arg(long, default_value_t = DEFAULT_START)]
    pub start: i64,

    /// Last sample year when no file is given
    #[arg(long, default_value_t = DEFAULT_END)]
    pub end: i64,

    /// Reject supplied Leap_Reason values that contradict Is_Leap_Year
    #[arg(long)]
    pub strict_reasons: bool,
}

/// Where and how a command writes a table.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, default_value = "tsv")]
    pub format: OutputFormat,

    /// Output path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the sample year table
    Sample {
        /// First year (inclusive)
        #[arg(long, default_value_t = DEFAULT_START)]
        start: i64,

        /// Last year (inclusive)
        #[arg(long, default_value_t = DEFAULT_END)]
        end: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Normalize a data file into the canonical leap year table
    Normalize {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Keep only the rows matching a condition
    Filter {
        #[command(flatten)]
        source: SourceArgs,

        /// Filter mode
        #[arg(short, long, default_value = "all")]
        mode: FilterMode,

        /// Year bound for the after and leap-after modes
        #[arg(short, long)]
        year: Option<i64>,

        /// Keep only the first N matching rows
        #[arg(short = 'n', long, conflicts_with = "tail")]
        limit: Option<usize>,

        /// Keep only the last N matching rows
        #[arg(short, long, conflicts_with = "limit")]
        tail: Option<usize>,

        /// Drop rows with any missing cell before filtering
        #[arg(long)]
        drop_missing: bool,

        /// Drop repeated rows before filtering, keeping the first
        #[arg(long)]
        drop_duplicates: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Aggregate rows by leap reason or year group
    Group {
        #[command(flatten)]
        source: SourceArgs,

        /// Grouping key
        #[arg(short, long, default_value = "reason")]
        by: GroupKey,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show shape, missing values and statistics
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a single year is a leap year
    Check {
        /// Year to check
        #[arg(value_name = "YEAR", value_parser = clap::value_parser!(i64).range(1..=9999))]
        year: i64,
    },
}

/// Row filter selected on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    All,
    Leap,
    NonLeap,
    After,
    AboveMean,
    LeapAfter,
}

impl FilterMode {
    /// Resolve the mode into a library filter, using `year` as the bound.
    pub fn to_filter(self, year: Option<i64>) -> Result<LeapFilter, String> {
        let bound = || year.ok_or_else(|| format!("--year is required for --mode {}", self));
        Ok(match self {
            FilterMode::All => LeapFilter::All,
            FilterMode::Leap => LeapFilter::LeapOnly,
            FilterMode::NonLeap => LeapFilter::NonLeapOnly,
            FilterMode::After => LeapFilter::YearAfter(bound()?),
            FilterMode::AboveMean => LeapFilter::AboveMeanYear,
            FilterMode::LeapAfter => LeapFilter::LeapAfter(bound()?),
        })
    }
}

impl std::str::FromStr for FilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "all" => Ok(FilterMode::All),
            "leap" => Ok(FilterMode::Leap),
            "non-leap" | "common" => Ok(FilterMode::NonLeap),
            "after" => Ok(FilterMode::After),
            "above-mean" => Ok(FilterMode::AboveMean),
            "leap-after" => Ok(FilterMode::LeapAfter),
            _ => Err(format!(
                "Unknown filter mode: {}. Use: all, leap, non-leap, after, above-mean, or leap-after.",
                s
            )),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::All => write!(f, "all"),
            FilterMode::Leap => write!(f, "leap"),
            FilterMode::NonLeap => write!(f, "non-leap"),
            FilterMode::After => write!(f, "after"),
            FilterMode::AboveMean => write!(f, "above-mean"),
            FilterMode::LeapAfter => write!(f, "leap-after"),
        }
    }
}
