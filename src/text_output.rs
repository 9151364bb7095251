//! Markdown report for --format text
//!
//! All instants are shown in the configured zone; raw schedule entries are
//! printed exactly as PagerDuty returned them.

use crate::count::CountReport;
use std::fmt::Write;

const DATE_TIME_LAYOUT: &str = "%a, %Y-%m-%d %H:%M%z";
const TIME_LAYOUT: &str = "%H:%M";

/// Render the summary, per-shift details and raw schedules
pub fn render(report: &CountReport) -> anyhow::Result<String> {
    let mut out = String::new();
    write_report(&mut out, report)?;
    Ok(out)
}

fn write_report(out: &mut String, report: &CountReport) -> std::fmt::Result {
    writeln!(out, "# Summary")?;
    writeln!(out)?;
    for (user, total) in report.totals.iter() {
        writeln!(out, "- {}: {:.2}", user, total)?;
    }
    writeln!(out, "- Total: {:.2}", report.total())?;
    writeln!(out, "- Expected total: {}", report.expected_total())?;
    writeln!(out)?;

    writeln!(out, "# Details")?;
    writeln!(out)?;
    for shift in &report.shifts {
        writeln!(
            out,
            "- {} - {}",
            shift.start.format(DATE_TIME_LAYOUT),
            shift.end.format(DATE_TIME_LAYOUT)
        )?;
        for schedule in &report.schedules {
            writeln!(out, "    - {}", schedule.name)?;
            for detail in shift.details_for(&schedule.name) {
                writeln!(
                    out,
                    "        - {}: {:.2} ({} - {})",
                    detail.user,
                    detail.proportion,
                    detail.start.format(TIME_LAYOUT),
                    detail.end.format(TIME_LAYOUT)
                )?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "# PagerDuty schedules")?;
    for schedule in &report.schedules {
        writeln!(out)?;
        writeln!(out, "## {}", schedule.name)?;
        writeln!(out)?;
        for entry in &schedule.entries {
            writeln!(out, "- {} - {}: {}", entry.start, entry.end, entry.user.summary)?;
        }
    }
    Ok(())
}
