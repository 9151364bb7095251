//! Shift intervals and their per-roster attribution
//!
//! A `Shift` is merge-joined against each roster's `ScheduleEntryIter`. The
//! cursor advance is a side effect shared by every shift submitted to the same
//! iterator, so shifts must be submitted in chronological order.

use crate::schedule::{ScheduleEntry, ScheduleEntryIter};
use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use std::collections::BTreeMap;

/// Portion of a shift covered by one roster entry
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftDetail {
    pub user: String,
    /// Intersection start, clamped to the shift
    pub start: DateTime<Tz>,
    /// Intersection end, clamped to the shift
    pub end: DateTime<Tz>,
    /// Fraction of the shift duration, in [0, 1]
    pub proportion: f64,
}

/// A single on-call shift `[start, end)`
#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Roster name → chronologically ordered details
    pub details: BTreeMap<String, Vec<ShiftDetail>>,
    duration: TimeDelta,
}

impl Shift {
    /// Create a shift; the duration is fixed here and never recomputed
    ///
    /// # Panics
    /// Panics if `end` is not after `start`: a zero-length shift has no
    /// meaningful proportions.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        assert!(end > start, "shift must end after it starts ({} - {})", start, end);
        Self {
            start,
            end,
            details: BTreeMap::new(),
            duration: end - start,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.duration
    }

    /// Details recorded for one roster (empty if none overlapped)
    pub fn details_for(&self, roster: &str) -> &[ShiftDetail] {
        self.details.get(roster).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record the overlap with every entry of `iter` that intersects this shift
    ///
    /// ```text
    ///                  start       end
    ///                  |-----------|
    /// 1.                              |-----------|   stop, keep entry
    /// 2. |-----------|                                skip entry
    /// 3. |--------------------|                       record, next entry
    /// 4. |----------------------------------------|   record, keep entry
    /// ```
    pub fn add_details(&mut self, iter: &mut ScheduleEntryIter) {
        while let Some(entry) = iter.peek() {
            if entry.start >= self.end {
                // 1
                break;
            }
            if entry.end <= self.start {
                // 2
                iter.next_entry();
                continue;
            }

            self.add_detail(iter.name(), entry);
            if entry.end > self.end {
                // 4
                break;
            }
            // 3
            iter.next_entry();
        }
    }

    fn add_detail(&mut self, roster: &str, entry: &ScheduleEntry) {
        let start = self.start.max(entry.start);
        let end = self.end.min(entry.end);
        let proportion = nanoseconds(end - start) / nanoseconds(self.duration);

        self.details
            .entry(roster.to_string())
            .or_default()
            .push(ShiftDetail {
                user: entry.user.clone(),
                start,
                end,
                proportion,
            });
    }
}

/// Duration in nanoseconds; spans too long for `i64` fall back to milliseconds
fn nanoseconds(delta: TimeDelta) -> f64 {
    delta
        .num_nanoseconds()
        .map_or(delta.num_milliseconds() as f64 * 1e6, |n| n as f64)
}
