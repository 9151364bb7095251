//! CLI argument parsing for pd-shift
//!
//! Every flag can also be set through a `PD_SHIFT_*` environment variable or
//! the config file; see `config` for how the layers are merged.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Output format for the count report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown report (default)
    #[default]
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis, one row per shift detail
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "pd-shift")]
#[command(version)]
#[command(about = "A CLI tool for managing PagerDuty on-call shifts", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true, value_name = "PATH", env = "PD_SHIFT_CONFIG")]
    pub config: Option<PathBuf>,

    /// PagerDuty API key
    #[arg(
        long,
        global = true,
        value_name = "KEY",
        env = "PD_SHIFT_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Enable debug logging to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count PagerDuty on-call shifts
    Count(CountArgs),
}

/// Flags of the count command; unset values fall back to the config file
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CountArgs {
    /// Time zone used for handoff-times, since, and until [default: UTC]
    #[arg(long, value_name = "TZ", env = "PD_SHIFT_COUNT_TIME_ZONE")]
    pub time_zone: Option<String>,

    /// List of schedule IDs to include in the count
    #[arg(
        long,
        value_name = "IDS",
        value_delimiter = ',',
        env = "PD_SHIFT_COUNT_SCHEDULE_IDS"
    )]
    pub schedule_ids: Vec<String>,

    /// List of handoff times (HH:MM)
    #[arg(
        long,
        value_name = "TIMES",
        value_delimiter = ',',
        env = "PD_SHIFT_COUNT_HANDOFF_TIMES"
    )]
    pub handoff_times: Vec<String>,

    /// List of shifts to count (e.g. "working-days:22:00-10:00,non-working-days")
    #[arg(
        long,
        value_name = "CONDS",
        value_delimiter = ',',
        env = "PD_SHIFT_COUNT_INCLUDE"
    )]
    pub include: Vec<String>,

    /// List of non-working days used by include (e.g. "JP holidays,Sat,Sun,Dec 31")
    #[arg(
        long,
        value_name = "DAYS",
        value_delimiter = ',',
        env = "PD_SHIFT_COUNT_NON_WORKING_DAYS"
    )]
    pub non_working_days: Vec<String>,

    /// Start of the date range for counting on-call shifts (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", env = "PD_SHIFT_COUNT_SINCE")]
    pub since: Option<String>,

    /// End of the date range, exclusive (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", env = "PD_SHIFT_COUNT_UNTIL")]
    pub until: Option<String>,

    /// Output format [default: text]
    #[arg(long, value_enum, env = "PD_SHIFT_COUNT_FORMAT")]
    pub format: Option<OutputFormat>,
}
