//! JSON output format for count reports
//!
//! Same three sections as the text report. Instants are RFC 3339 in the
//! configured zone; raw schedule entries keep PagerDuty's text.

use crate::count::CountReport;
use crate::pagerduty::RenderedScheduleEntry;
use crate::shift::Shift;
use serde::{Deserialize, Serialize};

/// One user's accumulated proportion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonUserTotal {
    pub user: String,
    pub total: f64,
}

/// Summary section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Sorted by user name
    pub users: Vec<JsonUserTotal>,
    pub total: f64,
    /// Shifts × schedules
    pub expected_total: usize,
}

/// Portion of a shift covered by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonShiftDetail {
    pub user: String,
    pub start: String,
    pub end: String,
    pub proportion: f64,
}

/// Details recorded for one schedule within a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonShiftSchedule {
    pub name: String,
    pub details: Vec<JsonShiftDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonShift {
    pub start: String,
    pub end: String,
    pub schedules: Vec<JsonShiftSchedule>,
}

/// A fetched schedule with its raw entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchedule {
    pub id: String,
    pub name: String,
    pub entries: Vec<RenderedScheduleEntry>,
}

/// Root JSON output structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    pub time_zone: String,
    pub summary: JsonSummary,
    pub shifts: Vec<JsonShift>,
    pub schedules: Vec<JsonSchedule>,
}

impl JsonOutput {
    pub fn from_report(report: &CountReport) -> Self {
        let names: Vec<&str> = report.schedules.iter().map(|s| s.name.as_str()).collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "pd-shift-json-v1".to_string(),
            time_zone: report.time_zone.name().to_string(),
            summary: JsonSummary {
                users: report
                    .totals
                    .iter()
                    .map(|(user, total)| JsonUserTotal {
                        user: user.to_string(),
                        total,
                    })
                    .collect(),
                total: report.total(),
                expected_total: report.expected_total(),
            },
            shifts: report.shifts.iter().map(|s| json_shift(s, &names)).collect(),
            schedules: report
                .schedules
                .iter()
                .map(|s| JsonSchedule {
                    id: s.id.clone(),
                    name: s.name.clone(),
                    entries: s.entries.clone(),
                })
                .collect(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn json_shift(shift: &Shift, schedule_names: &[&str]) -> JsonShift {
    JsonShift {
        start: shift.start.to_rfc3339(),
        end: shift.end.to_rfc3339(),
        schedules: schedule_names
            .iter()
            .map(|name| JsonShiftSchedule {
                name: name.to_string(),
                details: shift
                    .details_for(name)
                    .iter()
                    .map(|d| JsonShiftDetail {
                        user: d.user.clone(),
                        start: d.start.to_rfc3339(),
                        end: d.end.to_rfc3339(),
                        proportion: d.proportion,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Render a report as pretty-printed JSON with a trailing newline
pub fn render(report: &CountReport) -> anyhow::Result<String> {
    let mut json = JsonOutput::from_report(report).to_json()?;
    json.push('\n');
    Ok(json)
}
