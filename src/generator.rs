//! Lazy generation of shift intervals
//!
//! Each day is split into legs at the handoff times. Shifts are produced one
//! leg at a time from `since` at the first handoff time until the cursor
//! reaches midnight of `until`, and filtered by the include conditions.

use crate::calendar::NonWorkingDaySet;
use crate::error::{Result, ShiftError};
use crate::filter::IncludeCondition;
use crate::shift::Shift;
use chrono::{
    DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta, TimeZone,
};
use chrono_tz::Tz;
use std::iter::FusedIterator;

/// Resolve an IANA time zone name such as "Asia/Tokyo" or "UTC"
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| ShiftError::InvalidTimeZone(name.to_string()))
}

/// Collects generator settings; validation happens in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct ShiftGeneratorBuilder {
    tz: Tz,
    since: String,
    until: String,
    handoff_times: Vec<String>,
    include: Vec<String>,
    non_working_days: Vec<String>,
}

impl ShiftGeneratorBuilder {
    /// Include conditions; an empty list accepts every shift
    pub fn include<I, S>(mut self, exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = exprs.into_iter().map(Into::into).collect();
        self
    }

    /// Non-working day tokens consulted by the include conditions
    pub fn non_working_days<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_working_days = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// Validate everything and create the generator
    pub fn build(self) -> Result<ShiftGenerator> {
        if self.handoff_times.is_empty() {
            return Err(ShiftError::NoHandoffTimes);
        }
        if !self.handoff_times.windows(2).all(|w| w[0] < w[1]) {
            return Err(ShiftError::UnsortedHandoffTimes(self.handoff_times));
        }
        let handoff_times = self
            .handoff_times
            .iter()
            .map(|s| parse_handoff_time(s))
            .collect::<Result<Vec<_>>>()?;

        let non_working_days = NonWorkingDaySet::from_tokens(&self.non_working_days)?;
        let include_conditions = IncludeCondition::from_exprs(&self.include, &handoff_times)?;
        let shift_durations = build_shift_durations(&handoff_times);

        let since_date = parse_date("since", &self.since)?;
        let until_date = parse_date("until", &self.until)?;
        let first = handoff_times[0];
        let start = localize(self.tz, since_date.and_time(first))?;
        let until = localize(self.tz, until_date.and_time(NaiveTime::MIN))?;
        let coverage_end = localize(self.tz, until_date.and_time(first))?;

        tracing::debug!(
            time_zone = %self.tz,
            legs = shift_durations.len(),
            %start,
            %until,
            conditions = include_conditions.len(),
            "built shift generator"
        );

        Ok(ShiftGenerator {
            tz: self.tz,
            start,
            until,
            coverage_end,
            current: start,
            index: 0,
            shift_durations,
            include_conditions,
            non_working_days,
        })
    }
}

/// Iterator over the shifts of a date range
///
/// Single pass: once exhausted it keeps returning `None`.
#[derive(Debug, Clone)]
pub struct ShiftGenerator {
    tz: Tz,
    start: DateTime<Tz>,
    until: DateTime<Tz>,
    coverage_end: DateTime<Tz>,
    current: DateTime<Tz>,
    index: usize,
    shift_durations: Vec<TimeDelta>,
    include_conditions: Vec<IncludeCondition>,
    non_working_days: NonWorkingDaySet,
}

impl ShiftGenerator {
    /// Start configuring a generator
    ///
    /// `since` and `until` are `YYYY-MM-DD` dates in `tz`; `until` is
    /// exclusive. `handoff_times` are `HH:MM` strings in ascending order.
    pub fn builder<S: AsRef<str>>(
        tz: Tz,
        since: &str,
        until: &str,
        handoff_times: &[S],
    ) -> ShiftGeneratorBuilder {
        ShiftGeneratorBuilder {
            tz,
            since: since.to_string(),
            until: until.to_string(),
            handoff_times: handoff_times.iter().map(|s| s.as_ref().to_string()).collect(),
            include: Vec::new(),
            non_working_days: Vec::new(),
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Duration of each leg, starting from the first handoff time
    pub fn shift_durations(&self) -> &[TimeDelta] {
        &self.shift_durations
    }

    /// `since` and `until` aligned to the first handoff time
    ///
    /// Roster data must cover this range for every generated shift to be
    /// fully attributed.
    pub fn coverage(&self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start, self.coverage_end)
    }

    fn accepts(&self, shift: &Shift) -> bool {
        self.include_conditions.is_empty()
            || self
                .include_conditions
                .iter()
                .any(|condition| condition.matches(shift, &self.non_working_days))
    }
}

impl Iterator for ShiftGenerator {
    type Item = Shift;

    fn next(&mut self) -> Option<Shift> {
        while self.current < self.until {
            let end = self.current + self.shift_durations[self.index];
            let shift = Shift::new(self.current, end);
            self.current = end;
            self.index = (self.index + 1) % self.shift_durations.len();

            if self.accepts(&shift) {
                return Some(shift);
            }
            tracing::trace!(start = %shift.start, end = %shift.end, "shift excluded");
        }
        None
    }
}

impl FusedIterator for ShiftGenerator {}

fn parse_handoff_time(s: &str) -> Result<NaiveTime> {
    if s.len() != 5 {
        return Err(ShiftError::InvalidHandoffTime(s.to_string()));
    }
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ShiftError::InvalidHandoffTime(s.to_string()))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ShiftError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Resolve a wall-clock time; ambiguous times take the earlier instant
///
/// A time skipped by a forward transition keeps the offset in effect before
/// the gap, which lands the same distance past the end of the gap.
fn localize(tz: Tz, local: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => Ok(t),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let before = tz.offset_from_utc_datetime(&(local - TimeDelta::days(1))).fix();
            let utc = local - TimeDelta::seconds(i64::from(before.local_minus_utc()));
            let resolved = tz.from_utc_datetime(&utc);
            if resolved.naive_local() > local {
                Ok(resolved)
            } else {
                Err(ShiftError::NonexistentLocalTime {
                    local: local.format("%Y-%m-%d %H:%M").to_string(),
                    zone: tz.name().to_string(),
                })
            }
        }
    }
}

/// Gap between consecutive handoff times, closing with the first one a day later
fn build_shift_durations(handoff_times: &[NaiveTime]) -> Vec<TimeDelta> {
    let first = handoff_times[0];
    let mut offsets: Vec<TimeDelta> = handoff_times.iter().map(|t| *t - first).collect();
    offsets.push(TimeDelta::days(1));
    offsets.windows(2).map(|w| w[1] - w[0]).collect()
}
