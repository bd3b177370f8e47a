use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roofops", version, about = "Weather-compliance decisions for roofing crews")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test connections
    Check,
    /// Fetch weather and print the compliance report (the default action)
    Report {
        /// Emit machine-readable JSON instead of text
        #[arg(long)]
        json: bool,

        /// Restrict the report to a single assembly id
        #[arg(short, long)]
        assembly: Option<String>,
    },
    /// Manage the crew work log
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Record a work day
    Add {
        /// Entry date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Assembly id the crew worked on
        #[arg(long)]
        assembly: String,

        /// Crew headcount
        #[arg(long, default_value_t = 1)]
        crew: u32,

        /// Hours worked
        #[arg(long)]
        hours: f64,

        /// Completed, PartialDay, RainedOut, or Standby
        #[arg(long, default_value = "Completed")]
        status: String,

        #[arg(long)]
        notes: Option<String>,
    },
    /// List recent entries
    List {
        #[arg(long, default_value_t = 14)]
        limit: u32,
    },
}
