//! The count command: fetch rosters, attribute shifts, build the report

use crate::cli::OutputFormat;
use crate::generator::ShiftGenerator;
use crate::pagerduty::{RenderedScheduleEntry, ScheduleClient, ScheduleQuery};
use crate::schedule::ScheduleEntryIter;
use crate::shift::Shift;
use crate::summary::UserTotals;
use crate::{csv_output, json_output, text_output};
use anyhow::Result;
use chrono_tz::Tz;

/// Wall-clock layout of schedule query bounds, interpreted in the query zone
const QUERY_LAYOUT: &str = "%Y-%m-%d %H:%M";

/// A fetched roster as PagerDuty rendered it
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleReport {
    pub id: String,
    pub name: String,
    pub entries: Vec<RenderedScheduleEntry>,
}

/// Everything the output formats need
#[derive(Debug, Clone, PartialEq)]
pub struct CountReport {
    pub time_zone: Tz,
    /// In configured order
    pub schedules: Vec<ScheduleReport>,
    /// Reported shifts with details populated
    pub shifts: Vec<Shift>,
    pub totals: UserTotals,
}

impl CountReport {
    /// Total a fully covered range would reach: one per shift per roster
    pub fn expected_total(&self) -> usize {
        self.shifts.len() * self.schedules.len()
    }

    pub fn total(&self) -> f64 {
        self.totals.total()
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => text_output::render(self),
            OutputFormat::Json => json_output::render(self),
            OutputFormat::Csv => Ok(csv_output::render(self)),
        }
    }
}

/// Schedule request covering every shift the generator can produce
pub fn schedule_query(generator: &ShiftGenerator) -> ScheduleQuery {
    let (since, until) = generator.coverage();
    ScheduleQuery {
        time_zone: generator.time_zone().name().to_string(),
        since: since.format(QUERY_LAYOUT).to_string(),
        until: until.format(QUERY_LAYOUT).to_string(),
    }
}

/// Drive every generated shift through every roster cursor
pub fn attribute(
    generator: ShiftGenerator,
    iters: &mut [ScheduleEntryIter],
) -> (Vec<Shift>, UserTotals) {
    let mut shifts = Vec::new();
    let mut totals = UserTotals::new();
    for mut shift in generator {
        for iter in iters.iter_mut() {
            shift.add_details(iter);
        }
        totals.record(&shift);
        shifts.push(shift);
    }
    (shifts, totals)
}

/// Fetch each schedule in order and attribute the generated shifts to it
///
/// # Errors
/// Any fetch failure aborts the run; no retries are attempted.
pub fn run_count<C: ScheduleClient + ?Sized>(
    client: &C,
    schedule_ids: &[String],
    generator: ShiftGenerator,
) -> Result<CountReport> {
    let tz = generator.time_zone();
    let query = schedule_query(&generator);

    let mut schedules = Vec::with_capacity(schedule_ids.len());
    let mut iters = Vec::with_capacity(schedule_ids.len());
    for id in schedule_ids {
        let schedule = client
            .get_schedule(id, &query)
            .map_err(|e| anyhow::anyhow!("failed to get PagerDuty schedule: {}", e))?;
        let entries = schedule.final_schedule.rendered_schedule_entries;
        tracing::info!(
            id = %id,
            name = %schedule.name,
            entries = entries.len(),
            "fetched schedule"
        );

        iters.push(ScheduleEntryIter::new(&schedule.name, tz, &entries)?);
        schedules.push(ScheduleReport {
            id: schedule.id,
            name: schedule.name,
            entries,
        });
    }

    let (shifts, totals) = attribute(generator, &mut iters);
    tracing::info!(shifts = shifts.len(), users = totals.len(), "attributed shifts");

    Ok(CountReport {
        time_zone: tz,
        schedules,
        shifts,
        totals,
    })
}
