//! Non-working day classification
//!
//! A `NonWorkingDaySet` is built from human-readable tokens such as
//! `"JP holidays"`, `"Sat"`, `"Sunday"` or `"Dec 31"` and answers whether the
//! calendar day of an instant is a non-working day.
//!
//! Tokens resolve in order of precedence:
//! 1. a named holiday calendar (`"JP holidays"`)
//! 2. a weekday name or abbreviation
//! 3. a month and day (`"Jan 2"`, `"Jan 02"`, `"January 2"`)
//!
//! Matching is done on the local calendar day of the instant passed in, so
//! callers must hand over instants already converted to the configured zone.

mod japan;

use crate::error::{Result, ShiftError};
use chrono::{DateTime, Datelike, Month, NaiveDate, TimeZone, Weekday};

/// Token naming the Japanese public holiday calendar
pub const JP_HOLIDAYS: &str = "JP holidays";

/// Public holiday calendars that can be referenced by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayCalendar {
    Japan,
}

impl HolidayCalendar {
    /// Check if `date` is a public holiday in this calendar
    pub fn covers(self, date: NaiveDate) -> bool {
        match self {
            Self::Japan => japan::is_holiday(date),
        }
    }
}

/// A single non-working day rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonWorkingDay {
    /// Every public holiday of a calendar
    Holidays(HolidayCalendar),
    /// Every occurrence of a weekday
    Weekday(Weekday),
    /// The same month and day every year
    MonthDay { month: u32, day: u32 },
}

impl NonWorkingDay {
    /// Parse a token like "JP holidays", "Sat" or "Dec 29"
    pub fn from_token(token: &str) -> Result<Self> {
        if token == JP_HOLIDAYS {
            return Ok(Self::Holidays(HolidayCalendar::Japan));
        }
        if let Ok(weekday) = token.parse::<Weekday>() {
            return Ok(Self::Weekday(weekday));
        }
        parse_month_day(token)
            .map(|(month, day)| Self::MonthDay { month, day })
            .ok_or_else(|| ShiftError::InvalidNonWorkingDay(token.to_string()))
    }

    fn covers_date(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Holidays(calendar) => calendar.covers(date),
            Self::Weekday(weekday) => date.weekday() == weekday,
            Self::MonthDay { month, day } => date.month() == month && date.day() == day,
        }
    }

    /// Check if this rule covers the local calendar day of `instant`
    pub fn cover<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        self.covers_date(instant.date_naive())
    }
}

/// Parse "Jan 2", "Jan 02", "January 2" or "January 02" into (month, day)
fn parse_month_day(token: &str) -> Option<(u32, u32)> {
    let mut parts = token.split_whitespace();
    let (Some(month), Some(day), None) = (parts.next(), parts.next(), parts.next()) else {
        return None;
    };
    let month = month.parse::<Month>().ok()?.number_from_month();
    if day.len() > 2 || !day.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day = day.parse::<u32>().ok()?;
    // 2000 is a leap year, so "Feb 29" is accepted
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some((month, day))
}

/// Ordered collection of non-working day rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NonWorkingDaySet {
    days: Vec<NonWorkingDay>,
}

impl NonWorkingDaySet {
    /// Parse every token; the first invalid token aborts construction
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let days = tokens
            .iter()
            .map(|token| NonWorkingDay::from_token(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { days })
    }

    /// Check if any rule covers the local calendar day of `instant`
    pub fn cover<Z: TimeZone>(&self, instant: &DateTime<Z>) -> bool {
        self.days.iter().any(|day| day.cover(instant))
    }
}
