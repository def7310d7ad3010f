//! Expected contribution dates for a committee

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::types::{Committee, Frequency};

/// Generate the expected contribution dates of a committee.
///
/// The sequence starts at `start` (or the committee's start date) and runs
/// through `end` inclusive (or today). Each element is one step of the
/// committee's frequency after the previous one, so the result is strictly
/// increasing. An `end` before the start yields an empty schedule.
pub fn generate_schedule(
    committee: &Committee,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<NaiveDate> {
    let start = start.unwrap_or_else(|| committee.start_date.date());
    let end = end.unwrap_or_else(|| Local::now().date_naive());

    let mut schedule = Vec::new();
    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        schedule.push(date);
        current = next_date(date, committee.frequency);
    }

    tracing::debug!(
        committee_id = %committee.id,
        frequency = %committee.frequency,
        %start,
        %end,
        cycles = schedule.len(),
        "generated contribution schedule"
    );

    schedule
}

/// Advance a date by one contribution cycle.
///
/// Returns `None` only when the calendar range of `NaiveDate` is exhausted.
pub fn next_date(date: NaiveDate, frequency: Frequency) -> Option<NaiveDate> {
    match frequency {
        Frequency::Monthly => add_month_rolling(date),
        Frequency::Weekly => date.checked_add_days(Days::new(7)),
        Frequency::Daily => date.checked_add_days(Days::new(1)),
    }
}

/// Add one calendar month, keeping the day of month.
///
/// When that day does not exist in the next month the surplus days roll
/// over into the month after it: Jan 31 becomes Mar 3 outside leap years.
pub fn add_month_rolling(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}
