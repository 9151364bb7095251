//! Roster entries and the forward-only cursor used to attribute them
//!
//! `ScheduleEntryIter` is deliberately not a plain `Iterator`: shifts peek at
//! the current entry, and only move past it once it is fully consumed, so an
//! entry spanning several shifts stays current across `Shift::add_details`
//! calls. The cursor never rewinds.

use crate::error::{Result, ShiftError};
use crate::pagerduty::RenderedScheduleEntry;
use chrono::DateTime;
use chrono_tz::Tz;

/// One contiguous on-call assignment from a roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub user: String,
}

impl ScheduleEntry {
    /// Convert a rendered PagerDuty entry into the configured zone
    pub fn from_rendered(schedule: &str, tz: Tz, entry: &RenderedScheduleEntry) -> Result<Self> {
        Ok(Self {
            start: parse_timestamp(schedule, tz, &entry.start)?,
            end: parse_timestamp(schedule, tz, &entry.end)?,
            user: entry.user.summary.clone(),
        })
    }
}

fn parse_timestamp(schedule: &str, tz: Tz, value: &str) -> Result<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&tz))
        .map_err(|_| ShiftError::InvalidScheduleEntry {
            schedule: schedule.to_string(),
            value: value.to_string(),
        })
}

/// Cursor over one roster's entries, sorted by start time
///
/// Entries are expected to partition time without overlaps. Overlaps are
/// reported with a warning but not corrected; they yield extra detail rows
/// whose proportions may sum above 1.0.
#[derive(Debug, Clone)]
pub struct ScheduleEntryIter {
    name: String,
    entries: Vec<ScheduleEntry>,
    index: usize,
}

impl ScheduleEntryIter {
    /// Parse a roster's rendered entries; any unparseable timestamp is fatal
    pub fn new(name: &str, tz: Tz, rendered: &[RenderedScheduleEntry]) -> Result<Self> {
        let entries = rendered
            .iter()
            .map(|entry| ScheduleEntry::from_rendered(name, tz, entry))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_entries(name, entries))
    }

    /// Build a cursor from already parsed entries, positioned at the first one
    pub fn from_entries(name: &str, entries: Vec<ScheduleEntry>) -> Self {
        for pair in entries.windows(2) {
            if pair[1].start < pair[0].end {
                tracing::warn!(
                    schedule = name,
                    previous = %pair[0].start,
                    next = %pair[1].start,
                    "schedule entries overlap or are out of order; proportions may be wrong"
                );
            }
        }

        Self {
            name: name.to_string(),
            entries,
            index: 0,
        }
    }

    /// Roster name details are recorded under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current entry, or `None` once exhausted
    pub fn peek(&self) -> Option<&ScheduleEntry> {
        self.entries.get(self.index)
    }

    /// Advance to and return the next entry, or `None` once exhausted
    pub fn next_entry(&mut self) -> Option<&ScheduleEntry> {
        if self.index < self.entries.len() {
            self.index += 1;
        }
        self.entries.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Tokyo;
    use chrono_tz::UTC;

    fn rendered(start: &str, end: &str, user: &str) -> RenderedScheduleEntry {
        RenderedScheduleEntry::new(start, end, user)
    }

    #[test]
    fn test_new_converts_to_configured_zone() {
        let iter = ScheduleEntryIter::new(
            "Weekly Rotation",
            UTC,
            &[rendered("2025-07-01T05:00:00+09:00", "2025-07-05T09:00:00+09:00", "John Smith")],
        )
        .unwrap();

        let entry = iter.peek().unwrap();
        assert_eq!(entry.start, UTC.with_ymd_and_hms(2025, 6, 30, 20, 0, 0).unwrap());
        assert_eq!(entry.end, UTC.with_ymd_and_hms(2025, 7, 5, 0, 0, 0).unwrap());
        assert_eq!(entry.user, "John Smith");
        assert_eq!(entry.start.timezone(), UTC);
    }

    #[test]
    fn test_new_rejects_bad_timestamp() {
        let result = ScheduleEntryIter::new(
            "primary",
            Tokyo,
            &[
                rendered("2025-07-01T05:00:00+09:00", "2025-07-02T05:00:00+09:00", "a"),
                rendered("2025-07-02 05:00", "2025-07-03T05:00:00+09:00", "b"),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            ShiftError::InvalidScheduleEntry {
                schedule: "primary".to_string(),
                value: "2025-07-02 05:00".to_string(),
            }
        );
    }

    #[test]
    fn test_cursor_starts_at_first_entry_and_advances() {
        let mut iter = ScheduleEntryIter::new(
            "primary",
            Tokyo,
            &[
                rendered("2025-07-01T05:00:00+09:00", "2025-07-02T05:00:00+09:00", "a"),
                rendered("2025-07-02T05:00:00+09:00", "2025-07-03T05:00:00+09:00", "b"),
            ],
        )
        .unwrap();

        assert_eq!(iter.name(), "primary");
        assert_eq!(iter.peek().unwrap().user, "a");
        assert_eq!(iter.next_entry().unwrap().user, "b");
        assert_eq!(iter.peek().unwrap().user, "b");
        assert!(iter.next_entry().is_none());
        assert!(iter.peek().is_none());
        assert!(iter.peek().is_none());
        // Stays exhausted
        assert!(iter.next_entry().is_none());
    }

    #[test]
    fn test_empty_roster_is_exhausted() {
        let iter = ScheduleEntryIter::new("empty", Tokyo, &[]).unwrap();
        assert!(iter.peek().is_none());
        assert!(iter.peek().is_none());
    }
}
