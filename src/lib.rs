//! pd-shift - count PagerDuty on-call shifts per person
//!
//! This library generates the shift intervals of a date range from a set of
//! daily handoff times, filters them by working/non-working day rules, and
//! attributes each shift to the people on call in one or more rosters.
//!
//! ```no_run
//! use chrono_tz::Asia::Tokyo;
//! use pd_shift::{ShiftGenerator, ScheduleEntryIter, RenderedScheduleEntry};
//!
//! let generator = ShiftGenerator::builder(Tokyo, "2025-07-01", "2025-07-08", &["10:00", "22:00"])
//!     .include(["working-days:22:00-10:00", "non-working-days"])
//!     .non_working_days(["JP holidays", "Sat", "Sun"])
//!     .build()?;
//!
//! let entries = vec![RenderedScheduleEntry::new(
//!     "2025-07-01T10:00:00+09:00",
//!     "2025-07-08T10:00:00+09:00",
//!     "John Smith",
//! )];
//! let mut roster = ScheduleEntryIter::new("Weekly Rotation", Tokyo, &entries)?;
//! for mut shift in generator {
//!     shift.add_details(&mut roster);
//! }
//! # Ok::<(), pd_shift::ShiftError>(())
//! ```

pub mod calendar;
pub mod cli;
pub mod config;
pub mod count;
pub mod csv_output;
pub mod error;
pub mod filter;
pub mod generator;
pub mod json_output;
pub mod pagerduty;
pub mod schedule;
pub mod shift;
pub mod summary;
pub mod text_output;

pub use calendar::{NonWorkingDay, NonWorkingDaySet};
pub use error::{Result, ShiftError};
pub use filter::{IncludeCondition, TimeRange};
pub use generator::{parse_time_zone, ShiftGenerator, ShiftGeneratorBuilder};
pub use pagerduty::{RenderedScheduleEntry, Schedule, ScheduleClient};
pub use schedule::{ScheduleEntry, ScheduleEntryIter};
pub use shift::{Shift, ShiftDetail};
pub use summary::UserTotals;
