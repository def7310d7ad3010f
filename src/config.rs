//! Options for a single report run

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Options controlling schedule range and output details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// First expected date; defaults to the committee start date
    pub start: Option<NaiveDate>,
    /// Last date considered; defaults to the date of `generated_at`
    pub end: Option<NaiveDate>,
    /// Timestamp printed on the outputs; defaults to the local time of the run
    pub generated_at: Option<NaiveDateTime>,
    /// Append a totals row to the CSV export
    pub include_totals_row: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            generated_at: None,
            include_totals_row: true,
        }
    }
}

impl ReportOptions {
    /// Report up to and including the given date
    pub fn until(end: NaiveDate) -> Self {
        Self {
            end: Some(end),
            ..Self::default()
        }
    }

    /// Fix the generation timestamp
    pub fn generated_at(mut self, timestamp: NaiveDateTime) -> Self {
        self.generated_at = Some(timestamp);
        self
    }

    /// Resolve the generation timestamp for this run
    pub fn timestamp(&self) -> NaiveDateTime {
        self.generated_at
            .unwrap_or_else(|| Local::now().naive_local())
    }

    /// Resolve the schedule end date against a run timestamp
    pub fn end_date(&self, timestamp: NaiveDateTime) -> NaiveDate {
        self.end.unwrap_or_else(|| timestamp.date())
    }
}
