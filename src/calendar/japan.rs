//! Japanese public holidays (国民の祝日)
//!
//! Rule-based, so no holiday table needs refreshing every year. Covers the
//! current law and its changes since 1980:
//! - fixed-date holidays and the Happy Monday reforms (2000, 2003)
//! - vernal/autumnal equinox days by the usual approximation (1980-2099)
//! - renamed and moved holidays (Emperor's Birthday, Greenery/Shōwa Day,
//!   Mountain Day, the 2020/2021 Olympic moves)
//! - one-off state holidays (1989, 1990, 1993, 2019)
//! - substitute holidays (振替休日) and citizens' holidays (国民の休日)

use chrono::{Datelike, NaiveDate, Weekday};

/// Name of the holiday on `date`, if it is one
pub fn holiday_name(date: NaiveDate) -> Option<&'static str> {
    if let Some(name) = statutory_holiday(date) {
        return Some(name);
    }
    if is_substitute_holiday(date) {
        return Some("Substitute Holiday");
    }
    if is_citizens_holiday(date) {
        return Some("Citizens' Holiday");
    }
    None
}

/// Check if `date` is a public holiday in Japan
pub fn is_holiday(date: NaiveDate) -> bool {
    holiday_name(date).is_some()
}

/// Holidays named by the Public Holiday Act and one-off state holidays
fn statutory_holiday(date: NaiveDate) -> Option<&'static str> {
    let (y, m, d) = (date.year(), date.month(), date.day());
    let nth_monday = |n: u32| date.weekday() == Weekday::Mon && (d - 1) / 7 + 1 == n;
    let olympic_year = y == 2020 || y == 2021;

    let name = match (m, d) {
        (1, 1) => "New Year's Day",
        (1, 15) if y < 2000 => "Coming of Age Day",
        (1, _) if y >= 2000 && nth_monday(2) => "Coming of Age Day",
        (2, 11) if y >= 1967 => "National Foundation Day",
        (2, 23) if y >= 2020 => "Emperor's Birthday",
        (2, 24) if y == 1989 => "Funeral of Emperor Shōwa",
        (3, _) if Some(d) == vernal_equinox_day(y) => "Vernal Equinox Day",
        (4, 29) if y < 1989 => "Emperor's Birthday",
        (4, 29) if y < 2007 => "Greenery Day",
        (4, 29) => "Shōwa Day",
        (5, 1) if y == 2019 => "Enthronement Day",
        (5, 3) => "Constitution Memorial Day",
        (5, 4) if y >= 2007 => "Greenery Day",
        (5, 5) => "Children's Day",
        (6, 9) if y == 1993 => "Wedding of Crown Prince Naruhito",
        (7, 20) if (1996..2003).contains(&y) => "Marine Day",
        (7, 22) if y == 2021 => "Marine Day",
        (7, 23) if y == 2020 => "Marine Day",
        (7, 23) if y == 2021 => "Sports Day",
        (7, 24) if y == 2020 => "Sports Day",
        (7, _) if y >= 2003 && !olympic_year && nth_monday(3) => "Marine Day",
        (8, 8) if y == 2021 => "Mountain Day",
        (8, 10) if y == 2020 => "Mountain Day",
        (8, 11) if y >= 2016 && !olympic_year => "Mountain Day",
        (9, 15) if (1966..2003).contains(&y) => "Respect for the Aged Day",
        (9, _) if y >= 2003 && nth_monday(3) => "Respect for the Aged Day",
        (9, _) if Some(d) == autumnal_equinox_day(y) => "Autumnal Equinox Day",
        (10, 10) if (1966..2000).contains(&y) => "Health and Sports Day",
        (10, _) if (2000..2020).contains(&y) && nth_monday(2) => "Health and Sports Day",
        (10, _) if y >= 2022 && nth_monday(2) => "Sports Day",
        (10, 22) if y == 2019 => "Enthronement Ceremony Day",
        (11, 3) => "Culture Day",
        (11, 12) if y == 1990 => "Enthronement Ceremony Day",
        (11, 23) => "Labour Thanksgiving Day",
        (12, 23) if (1989..2019).contains(&y) => "Emperor's Birthday",
        _ => return None,
    };
    Some(name)
}

fn vernal_equinox_day(year: i32) -> Option<u32> {
    equinox_day(year, 20.8431)
}

fn autumnal_equinox_day(year: i32) -> Option<u32> {
    equinox_day(year, 23.2488)
}

/// Day of month of an equinox; the approximation only holds for 1980-2099
fn equinox_day(year: i32, base: f64) -> Option<u32> {
    if !(1980..=2099).contains(&year) {
        return None;
    }
    let offset = f64::from(year - 1980);
    Some((base + 0.242194 * offset - (offset / 4.0).floor()).floor() as u32)
}

/// A holiday on Sunday moves to the next day that is not a holiday.
///
/// Before 2007 only the Monday right after a Sunday holiday qualified.
fn is_substitute_holiday(date: NaiveDate) -> bool {
    if (date.year(), date.month(), date.day()) < (1973, 4, 12)
        || statutory_holiday(date).is_some()
    {
        return false;
    }
    let Some(mut day) = date.pred_opt() else {
        return false;
    };
    if date.year() < 2007 {
        return day.weekday() == Weekday::Sun && statutory_holiday(day).is_some();
    }
    while statutory_holiday(day).is_some() {
        if day.weekday() == Weekday::Sun {
            return true;
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => return false,
        }
    }
    false
}

/// A weekday sandwiched between two holidays is itself a holiday
fn is_citizens_holiday(date: NaiveDate) -> bool {
    if date.year() < 1988 || date.weekday() == Weekday::Sun || statutory_holiday(date).is_some() {
        return false;
    }
    match (date.pred_opt(), date.succ_opt()) {
        (Some(prev), Some(next)) => {
            statutory_holiday(prev).is_some() && statutory_holiday(next).is_some()
        }
        _ => false,
    }
}
