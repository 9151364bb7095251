//! Shift filtering for --include expressions
//!
//! Supports:
//! - Day classes: `working-days`, `non-working-days`
//! - Intra-day ranges: `working-days:22:00-10:00`
//!
//! A range must start at a handoff time and end at a handoff time. Ranges
//! spanning several legs (e.g. `10:00-06:00` with handoffs 10:00, 18:00 and
//! 06:00) expand into one `TimeRange` per leg.

use crate::calendar::NonWorkingDaySet;
use crate::error::{Result, ShiftError};
use crate::shift::Shift;
use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use regex::Regex;
use std::sync::OnceLock;

fn time_range_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A(\d{2}:\d{2})-(\d{2}:\d{2})\z").expect("valid regex"))
}

/// Local time-of-day pair a shift must start and end at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Compare the shift's local start/end clock times, ignoring the date
    pub fn matches(&self, shift: &Shift) -> bool {
        same_clock(&shift.start, self.start) && same_clock(&shift.end, self.end)
    }
}

fn same_clock<Z: TimeZone>(instant: &DateTime<Z>, time: NaiveTime) -> bool {
    let local = instant.time();
    local.hour() == time.hour() && local.minute() == time.minute()
}

/// Filter deciding whether a generated shift is reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncludeCondition {
    /// Shifts starting on a day not covered by the non-working day set
    WorkingDays { time_ranges: Vec<TimeRange> },
    /// Shifts starting on a day covered by the non-working day set
    NonWorkingDays { time_ranges: Vec<TimeRange> },
}

impl IncludeCondition {
    /// Parse an expression like "working-days" or "non-working-days:10:00-22:00"
    ///
    /// `handoff_times` must be sorted; range endpoints are resolved against it.
    pub fn from_expr(expr: &str, handoff_times: &[NaiveTime]) -> Result<Self> {
        let invalid = |reason: String| ShiftError::InvalidIncludeCondition {
            expr: expr.to_string(),
            reason,
        };

        let (kind, range) = match expr.split_once(':') {
            Some((kind, range)) => (kind, Some(range)),
            None => (expr, None),
        };

        let time_ranges = match range {
            Some(range) => expand_time_range(range, handoff_times).map_err(invalid)?,
            None => Vec::new(),
        };

        match kind {
            "working-days" => Ok(Self::WorkingDays { time_ranges }),
            "non-working-days" => Ok(Self::NonWorkingDays { time_ranges }),
            other => Err(invalid(format!("unknown include type {:?}", other))),
        }
    }

    /// Parse every expression; the first invalid one aborts
    pub fn from_exprs<S: AsRef<str>>(
        exprs: &[S],
        handoff_times: &[NaiveTime],
    ) -> Result<Vec<Self>> {
        exprs
            .iter()
            .map(|expr| Self::from_expr(expr.as_ref(), handoff_times))
            .collect()
    }

    pub fn time_ranges(&self) -> &[TimeRange] {
        match self {
            Self::WorkingDays { time_ranges } | Self::NonWorkingDays { time_ranges } => time_ranges,
        }
    }

    /// Check if a shift should be included
    pub fn matches(&self, shift: &Shift, non_working_days: &NonWorkingDaySet) -> bool {
        let wants_non_working = match self {
            Self::WorkingDays { .. } => false,
            Self::NonWorkingDays { .. } => true,
        };
        if non_working_days.cover(&shift.start) != wants_non_working {
            return false;
        }

        let time_ranges = self.time_ranges();
        time_ranges.is_empty() || time_ranges.iter().any(|range| range.matches(shift))
    }
}

/// Walk the cyclic handoff sequence from the range start until a leg ends at
/// the range end, producing one `TimeRange` per leg.
fn expand_time_range(
    range: &str,
    handoff_times: &[NaiveTime],
) -> std::result::Result<Vec<TimeRange>, String> {
    let caps = time_range_regex()
        .captures(range)
        .ok_or_else(|| format!("time range {:?} must be formatted as HH:MM-HH:MM", range))?;
    let parse = |s: &str| {
        NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| format!("invalid time {:?}", s))
    };
    let start = parse(&caps[1])?;
    let end = parse(&caps[2])?;

    let mut i = handoff_times
        .iter()
        .position(|t| *t == start)
        .ok_or_else(|| format!("start time {} must match one of handoff times", &caps[1]))?;

    let mut time_ranges = Vec::new();
    while time_ranges.len() < handoff_times.len() {
        let leg_start = handoff_times[i];
        i = (i + 1) % handoff_times.len();
        time_ranges.push(TimeRange::new(leg_start, handoff_times[i]));
        if handoff_times[i] == end {
            return Ok(time_ranges);
        }
    }

    Err(format!("end time {} must match one of handoff times", &caps[2]))
}
