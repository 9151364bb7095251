//! CSV output format for count reports
//!
//! One row per shift detail, for spreadsheet analysis. Shifts without any
//! coverage in a schedule produce no rows for it.

use crate::count::CountReport;

const HEADER: &str = "shift_start,shift_end,schedule,user,start,end,proportion";

/// CSV record for a single shift detail
#[derive(Debug, Clone, PartialEq)]
pub struct CsvDetail {
    pub shift_start: String,
    pub shift_end: String,
    pub schedule: String,
    pub user: String,
    pub start: String,
    pub end: String,
    pub proportion: f64,
}

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    details: Vec<CsvDetail>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every detail of the report, in shift then schedule order
    pub fn from_report(report: &CountReport) -> Self {
        let mut output = Self::new();
        for shift in &report.shifts {
            for schedule in &report.schedules {
                for detail in shift.details_for(&schedule.name) {
                    output.add_detail(CsvDetail {
                        shift_start: shift.start.to_rfc3339(),
                        shift_end: shift.end.to_rfc3339(),
                        schedule: schedule.name.clone(),
                        user: detail.user.clone(),
                        start: detail.start.to_rfc3339(),
                        end: detail.end.to_rfc3339(),
                        proportion: detail.proportion,
                    });
                }
            }
        }
        output
    }

    pub fn add_detail(&mut self, detail: CsvDetail) {
        self.details.push(detail);
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_detail(detail: &CsvDetail) -> String {
        [
            Self::escape_field(&detail.shift_start),
            Self::escape_field(&detail.shift_end),
            Self::escape_field(&detail.schedule),
            Self::escape_field(&detail.user),
            Self::escape_field(&detail.start),
            Self::escape_field(&detail.end),
            format!("{:.4}", detail.proportion),
        ]
        .join(",")
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        for detail in &self.details {
            output.push_str(&Self::format_detail(detail));
            output.push('\n');
        }
        output
    }
}

pub fn render(report: &CountReport) -> String {
    CsvOutput::from_report(report).to_csv()
}
