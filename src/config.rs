//! Config file loading and settings resolution
//!
//! Precedence, highest first: command-line flags, `PD_SHIFT_*` environment
//! variables (both handled by clap), the TOML config file, then defaults.
//!
//! # Example TOML
//! ```toml
//! api-key = "..."
//!
//! [count]
//! time-zone = "Asia/Tokyo"
//! schedule-ids = ["P4DRALL"]
//! handoff-times = ["10:00", "22:00"]
//! include = ["working-days:22:00-10:00", "non-working-days"]
//! non-working-days = ["JP holidays", "Sat", "Sun", "Dec 31"]
//! since = "2025-07-01"
//! until = "2025-08-01"
//! ```

use crate::cli::{CountArgs, OutputFormat};
use crate::error::Result as ShiftResult;
use crate::generator::{parse_time_zone, ShiftGenerator};
use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pd-shift";
const CONFIG_FILE: &str = "config.toml";

/// Contents of a config file; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FileConfig {
    pub api_key: Option<String>,
    #[serde(default)]
    pub count: CountFileConfig,
}

/// `[count]` table of the config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CountFileConfig {
    pub time_zone: Option<String>,
    pub schedule_ids: Vec<String>,
    pub handoff_times: Vec<String>,
    pub include: Vec<String>,
    pub non_working_days: Vec<String>,
    pub since: Option<String>,
    pub until: Option<String>,
    pub format: Option<OutputFormat>,
}

impl FileConfig {
    /// Load a config file
    ///
    /// # Errors
    /// Returns error if the file can't be read or isn't valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load `explicit` if given, otherwise the first default config file found
    ///
    /// An explicit path must exist; missing default files are skipped.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for path in default_config_paths() {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading config file");
                return Self::from_file(&path);
            }
        }
        tracing::debug!("no config file found");
        Ok(Self::default())
    }
}

/// Candidate config files in XDG base directory order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    match env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty()) {
        Some(home) => dirs.push(PathBuf::from(home)),
        None => {
            if let Some(home) = env::var_os("HOME").filter(|v| !v.is_empty()) {
                dirs.push(PathBuf::from(home).join(".config"));
            }
        }
    }

    let config_dirs = env::var("XDG_CONFIG_DIRS")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "/etc/xdg".to_string());
    dirs.extend(
        config_dirs
            .split(':')
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from),
    );

    dirs.into_iter()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .collect()
}

/// Fully resolved settings of the count command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountSettings {
    pub api_key: String,
    pub time_zone: Tz,
    pub schedule_ids: Vec<String>,
    /// Sorted ascending
    pub handoff_times: Vec<String>,
    pub include: Vec<String>,
    pub non_working_days: Vec<String>,
    pub since: String,
    pub until: String,
    pub format: OutputFormat,
}

impl CountSettings {
    /// Merge flag/env values over the config file and check required keys
    pub fn resolve(api_key: Option<String>, args: &CountArgs, file: FileConfig) -> Result<Self> {
        let count = file.count;

        let api_key = required(
            "api-key",
            "--api-key",
            "PD_SHIFT_API_KEY",
            api_key.or(file.api_key),
        )?;
        let time_zone_name = args
            .time_zone
            .clone()
            .or(count.time_zone)
            .unwrap_or_else(|| "UTC".to_string());
        let time_zone = parse_time_zone(&time_zone_name)?;

        let schedule_ids = required_list(
            "schedule-ids",
            "--schedule-ids",
            "PD_SHIFT_COUNT_SCHEDULE_IDS",
            merge_list(&args.schedule_ids, count.schedule_ids),
        )?;
        let mut handoff_times = required_list(
            "handoff-times",
            "--handoff-times",
            "PD_SHIFT_COUNT_HANDOFF_TIMES",
            merge_list(&args.handoff_times, count.handoff_times),
        )?;
        handoff_times.sort();

        let since = required(
            "since",
            "--since",
            "PD_SHIFT_COUNT_SINCE",
            args.since.clone().or(count.since),
        )?;
        let until = required(
            "until",
            "--until",
            "PD_SHIFT_COUNT_UNTIL",
            args.until.clone().or(count.until),
        )?;

        Ok(Self {
            api_key,
            time_zone,
            schedule_ids,
            handoff_times,
            include: merge_list(&args.include, count.include),
            non_working_days: merge_list(&args.non_working_days, count.non_working_days),
            since,
            until,
            format: args.format.or(count.format).unwrap_or_default(),
        })
    }

    /// Build the shift generator for these settings
    pub fn shift_generator(&self) -> ShiftResult<ShiftGenerator> {
        ShiftGenerator::builder(self.time_zone, &self.since, &self.until, &self.handoff_times)
            .include(self.include.iter().cloned())
            .non_working_days(self.non_working_days.iter().cloned())
            .build()
    }
}

fn merge_list(flag: &[String], file: Vec<String>) -> Vec<String> {
    if flag.is_empty() {
        file
    } else {
        flag.to_vec()
    }
}

fn required(key: &str, flag: &str, env_var: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => anyhow::bail!(
            "required setting \"{}\" not set (use {}, {} or the config file)",
            key,
            flag,
            env_var
        ),
    }
}

fn required_list(key: &str, flag: &str, env_var: &str, values: Vec<String>) -> Result<Vec<String>> {
    if values.is_empty() {
        anyhow::bail!(
            "required setting \"{}\" not set (use {}, {} or the config file)",
            key,
            flag,
            env_var
        );
    }
    Ok(values)
}
