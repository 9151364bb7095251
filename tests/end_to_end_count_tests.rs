// End-to-end count: generator + in-memory schedule client + text report

use chrono::TimeZone;
use chrono_tz::UTC;
use pd_shift::cli::OutputFormat;
use pd_shift::count::{run_count, CountReport};
use pd_shift::pagerduty::{
    PagerDutyError, RenderedScheduleEntry, Schedule, ScheduleClient, ScheduleLayer, ScheduleQuery,
};
use pd_shift::ShiftGenerator;
use std::cell::RefCell;

const NON_WORKING_DAYS: &[&str] = &[
    "JP holidays",
    "Sat",
    "Sun",
    "Dec 29",
    "Dec 30",
    "Dec 31",
    "Jan 1",
    "Jan 2",
    "Jan 3",
];

struct InMemoryClient {
    schedule: Schedule,
    queries: RefCell<Vec<(String, ScheduleQuery)>>,
}

impl ScheduleClient for InMemoryClient {
    fn get_schedule(&self, id: &str, query: &ScheduleQuery) -> Result<Schedule, PagerDutyError> {
        self.queries.borrow_mut().push((id.to_string(), query.clone()));
        Ok(self.schedule.clone())
    }
}

fn weekly_rotation() -> InMemoryClient {
    InMemoryClient {
        schedule: Schedule {
            id: "P4DRALL".to_string(),
            name: "Weekly Rotation".to_string(),
            final_schedule: ScheduleLayer {
                rendered_schedule_entries: vec![
                    RenderedScheduleEntry::new(
                        "2025-07-01T05:00:00+09:00",
                        "2025-07-05T09:00:00+09:00",
                        "John Smith",
                    ),
                    RenderedScheduleEntry::new(
                        "2025-07-05T09:00:00+09:00",
                        "2025-07-05T15:00:00+09:00",
                        "Takeshi Arabiki",
                    ),
                    RenderedScheduleEntry::new(
                        "2025-07-05T15:00:00+09:00",
                        "2025-07-07T05:00:00+09:00",
                        "John Smith",
                    ),
                    RenderedScheduleEntry::new(
                        "2025-07-07T05:00:00+09:00",
                        "2025-07-08T05:00:00+09:00",
                        "Takeshi Arabiki",
                    ),
                ],
            },
        },
        queries: RefCell::new(Vec::new()),
    }
}

fn run(client: &InMemoryClient) -> CountReport {
    let generator = ShiftGenerator::builder(UTC, "2025-07-01", "2025-07-08", &["05:00", "17:00"])
        .include(["working-days:17:00-05:00", "non-working-days"])
        .non_working_days(NON_WORKING_DAYS.iter().copied())
        .build()
        .unwrap();
    run_count(client, &["P4DRALL".to_string()], generator).unwrap()
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap();
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

#[test]
fn test_weekly_rotation_totals() {
    let client = weekly_rotation();
    let report = run(&client);

    assert_eq!(report.shifts.len(), 9);
    assert_eq!(report.expected_total(), 9);
    assert_close(report.totals.get("John Smith"), 6.75);
    assert_close(report.totals.get("Takeshi Arabiki"), 1.5);
    assert_close(Some(report.total()), 8.25);
}

#[test]
fn test_query_covers_whole_shifts() {
    let client = weekly_rotation();
    run(&client);

    let queries = client.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0],
        (
            "P4DRALL".to_string(),
            ScheduleQuery {
                time_zone: "UTC".to_string(),
                since: "2025-07-01 05:00".to_string(),
                until: "2025-07-08 05:00".to_string(),
            }
        )
    );
}

#[test]
fn test_details_split_at_roster_boundaries() {
    let report = run(&weekly_rotation());

    // Fri night: John until 00:00 UTC, then Takeshi
    let friday = &report.shifts[3];
    assert_eq!(friday.start, UTC.with_ymd_and_hms(2025, 7, 4, 17, 0, 0).unwrap());
    let details = friday.details_for("Weekly Rotation");
    assert_eq!(details.len(), 2);
    assert_eq!(details[0].user, "John Smith");
    assert_eq!(details[0].end, UTC.with_ymd_and_hms(2025, 7, 5, 0, 0, 0).unwrap());
    assert!((details[0].proportion - 7.0 / 12.0).abs() < 1e-9);
    assert_eq!(details[1].user, "Takeshi Arabiki");

    // Last shift runs past the end of the roster
    let last = report.shifts.last().unwrap();
    let sum: f64 = last.details_for("Weekly Rotation").iter().map(|d| d.proportion).sum();
    assert_eq!(sum, 0.25);
}

#[test]
fn test_text_report() {
    let report = run(&weekly_rotation());
    let expected = "\
# Summary

- John Smith: 6.75
- Takeshi Arabiki: 1.50
- Total: 8.25
- Expected total: 9

# Details

- Tue, 2025-07-01 17:00+0000 - Wed, 2025-07-02 05:00+0000
    - Weekly Rotation
        - John Smith: 1.00 (17:00 - 05:00)
- Wed, 2025-07-02 17:00+0000 - Thu, 2025-07-03 05:00+0000
    - Weekly Rotation
        - John Smith: 1.00 (17:00 - 05:00)
- Thu, 2025-07-03 17:00+0000 - Fri, 2025-07-04 05:00+0000
    - Weekly Rotation
        - John Smith: 1.00 (17:00 - 05:00)
- Fri, 2025-07-04 17:00+0000 - Sat, 2025-07-05 05:00+0000
    - Weekly Rotation
        - John Smith: 0.58 (17:00 - 00:00)
        - Takeshi Arabiki: 0.42 (00:00 - 05:00)
- Sat, 2025-07-05 05:00+0000 - Sat, 2025-07-05 17:00+0000
    - Weekly Rotation
        - Takeshi Arabiki: 0.08 (05:00 - 06:00)
        - John Smith: 0.92 (06:00 - 17:00)
- Sat, 2025-07-05 17:00+0000 - Sun, 2025-07-06 05:00+0000
    - Weekly Rotation
        - John Smith: 1.00 (17:00 - 05:00)
- Sun, 2025-07-06 05:00+0000 - Sun, 2025-07-06 17:00+0000
    - Weekly Rotation
        - John Smith: 1.00 (05:00 - 17:00)
- Sun, 2025-07-06 17:00+0000 - Mon, 2025-07-07 05:00+0000
    - Weekly Rotation
        - John Smith: 0.25 (17:00 - 20:00)
        - Takeshi Arabiki: 0.75 (20:00 - 05:00)
- Mon, 2025-07-07 17:00+0000 - Tue, 2025-07-08 05:00+0000
    - Weekly Rotation
        - Takeshi Arabiki: 0.25 (17:00 - 20:00)

# PagerDuty schedules

## Weekly Rotation

- 2025-07-01T05:00:00+09:00 - 2025-07-05T09:00:00+09:00: John Smith
- 2025-07-05T09:00:00+09:00 - 2025-07-05T15:00:00+09:00: Takeshi Arabiki
- 2025-07-05T15:00:00+09:00 - 2025-07-07T05:00:00+09:00: John Smith
- 2025-07-07T05:00:00+09:00 - 2025-07-08T05:00:00+09:00: Takeshi Arabiki
";
    assert_eq!(report.render(OutputFormat::Text).unwrap(), expected);
}

#[test]
fn test_csv_report_has_row_per_detail() {
    let report = run(&weekly_rotation());
    let csv = report.render(OutputFormat::Csv).unwrap();
    // header + 12 details
    assert_eq!(csv.lines().count(), 13);
    let row =
        "2025-07-04T17:00:00+00:00,2025-07-05T05:00:00+00:00,Weekly Rotation,Takeshi Arabiki,";
    assert!(csv.lines().any(|l| l.starts_with(row)));
}

#[test]
fn test_json_report_summary() {
    let report = run(&weekly_rotation());
    let json: serde_json::Value =
        serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(json["summary"]["expected_total"], 9);
    assert_eq!(json["summary"]["users"][0]["user"], "John Smith");
    assert_eq!(json["shifts"].as_array().unwrap().len(), 9);
    assert_eq!(json["schedules"][0]["name"], "Weekly Rotation");
}

#[test]
fn test_rerun_is_idempotent() {
    let first = run(&weekly_rotation());
    let second = run(&weekly_rotation());
    assert_eq!(first, second);
}
