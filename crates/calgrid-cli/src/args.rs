//! Command-line argument definitions for the Calgrid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the dataset, the span of the calendar to
//! lay out, the output destination, configuration file and logging verbosity.

use chrono::NaiveDate;
use clap::Parser;

use calgrid::calendar::ViewKind;

/// Command-line arguments for the Calgrid layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input dataset (TOML)
    #[arg(help = "Path to the dataset file")]
    pub dataset: String,

    /// Date to lay out (YYYY-MM-DD). Defaults to the earliest appointment
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// Calendar view (day, week, month). Defaults to the configured view
    #[arg(short, long)]
    pub view: Option<ViewKind>,

    /// Only show tracks of this professional
    #[arg(short, long)]
    pub resource: Option<String>,

    /// Path to the output file. Prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
