// Property-based tests for shift generation and attribution

use chrono::{DateTime, TimeDelta, TimeZone};
use chrono_tz::{Tz, UTC};
use pd_shift::{ScheduleEntry, ScheduleEntryIter, Shift, ShiftGenerator};
use proptest::prelude::*;

/// Strictly increasing, zero-padded handoff times
fn handoff_times() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(0u32..24 * 4, 1..5).prop_map(|quarters| {
        quarters
            .into_iter()
            .map(|q| format!("{:02}:{:02}", q / 4, (q % 4) * 15))
            .collect()
    })
}

/// Contiguous roster entries starting before the range, random lengths
fn roster() -> impl Strategy<Value = Vec<ScheduleEntry>> {
    prop::collection::vec((1i64..72, 0usize..3), 1..40).prop_map(|legs| {
        let mut start = UTC.with_ymd_and_hms(2025, 6, 29, 0, 0, 0).unwrap();
        legs.into_iter()
            .map(|(hours, user)| {
                let end = start + TimeDelta::hours(hours);
                let entry = ScheduleEntry {
                    start,
                    end,
                    user: format!("user{}", user),
                };
                start = end;
                entry
            })
            .collect()
    })
}

fn generate(handoffs: &[String], days: u32) -> Vec<Shift> {
    let until = format!("2025-07-{:02}", 1 + days);
    ShiftGenerator::builder(UTC, "2025-07-01", &until, handoffs)
        .build()
        .unwrap()
        .collect()
}

fn attribute(shifts: &[Shift], entries: &[ScheduleEntry]) -> Vec<Shift> {
    let mut iter = ScheduleEntryIter::from_entries("roster", entries.to_vec());
    shifts
        .iter()
        .cloned()
        .map(|mut shift| {
            shift.add_details(&mut iter);
            shift
        })
        .collect()
}

fn covered(entries: &[ScheduleEntry], start: DateTime<Tz>, end: DateTime<Tz>) -> bool {
    let first = entries.first().map(|e| e.start);
    let last = entries.last().map(|e| e.end);
    matches!((first, last), (Some(f), Some(l)) if f <= start && l >= end)
}

proptest! {
    #[test]
    fn prop_shifts_are_contiguous_and_cycle_through_legs(
        handoffs in handoff_times(),
        days in 1u32..20,
    ) {
        let until = format!("2025-07-{:02}", 1 + days);
        let generator = ShiftGenerator::builder(UTC, "2025-07-01", &until, &handoffs)
            .build()
            .unwrap();
        let durations = generator.shift_durations().to_vec();
        let total: TimeDelta = durations.iter().copied().sum();
        prop_assert_eq!(total, TimeDelta::days(1));

        let shifts: Vec<Shift> = generator.collect();
        prop_assert_eq!(shifts.len(), durations.len() * days as usize);
        for (i, shift) in shifts.iter().enumerate() {
            prop_assert_eq!(shift.end - shift.start, durations[i % durations.len()]);
        }
        for pair in shifts.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn prop_proportions_are_bounded_and_disjoint(
        handoffs in handoff_times(),
        days in 1u32..10,
        entries in roster(),
    ) {
        let shifts = attribute(&generate(&handoffs, days), &entries);
        for shift in &shifts {
            let details = shift.details_for("roster");
            let sum: f64 = details.iter().map(|d| d.proportion).sum();
            prop_assert!(sum <= 1.0 + 1e-9, "sum {} > 1", sum);
            for detail in details {
                prop_assert!(detail.proportion > 0.0 && detail.proportion <= 1.0);
                prop_assert!(detail.start >= shift.start && detail.end <= shift.end);
            }
            for pair in details.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
            if covered(&entries, shift.start, shift.end) {
                prop_assert!((sum - 1.0).abs() < 1e-9, "covered shift sums to {}", sum);
            }
        }
    }

    #[test]
    fn prop_attribution_is_idempotent(
        handoffs in handoff_times(),
        days in 1u32..10,
        entries in roster(),
    ) {
        let shifts = generate(&handoffs, days);
        prop_assert_eq!(attribute(&shifts, &entries), attribute(&shifts, &entries));
    }
}
