//! Core types and data structures for the committee reporting engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How often members of a committee are expected to contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// One contribution per calendar day
    Daily,
    /// One contribution every seven days
    Weekly,
    /// One contribution per calendar month
    Monthly,
}

impl Frequency {
    /// Parse a stored frequency label.
    ///
    /// Labels are matched case-insensitively. Anything that is not
    /// `weekly` or `monthly` steps daily, so a malformed label never
    /// aborts a report.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "monthly" => Frequency::Monthly,
            "weekly" => Frequency::Weekly,
            _ => Frequency::Daily,
        }
    }

    /// Lowercase label as stored by the data layer
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Frequency {
    fn from(label: String) -> Self {
        Frequency::from_label(&label)
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.label().to_string()
    }
}

/// A rotating savings committee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Committee {
    /// Unique identifier for the committee
    pub id: String,
    /// Display name
    pub name: String,
    /// Short code shown next to the name
    pub code: String,
    /// Contribution expected from each member per cycle
    pub amount: BigDecimal,
    /// Contribution cycle
    pub frequency: Frequency,
    /// When the first cycle starts
    pub start_date: NaiveDateTime,
}

impl Committee {
    /// Create a new committee
    pub fn new(
        id: String,
        name: String,
        code: String,
        amount: BigDecimal,
        frequency: Frequency,
        start_date: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            name,
            code,
            amount,
            frequency,
            start_date,
        }
    }
}

/// A participant of a committee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for the member
    pub id: String,
    /// Committee this member belongs to
    pub committee_id: String,
    /// Display name
    pub name: String,
    /// Phone number or other contact string
    pub contact: String,
    /// Position in the payout rotation, unique within the committee
    pub payout_order: u32,
    /// Whether the member already received the pooled payout
    pub payout_status: bool,
    /// When the payout happened; only set when `payout_status` is true
    pub payout_date: Option<NaiveDate>,
}

impl Member {
    /// Create a member who has not received a payout yet
    pub fn new(
        id: String,
        committee_id: String,
        name: String,
        contact: String,
        payout_order: u32,
    ) -> Self {
        Self {
            id,
            committee_id,
            name,
            contact,
            payout_order,
            payout_status: false,
            payout_date: None,
        }
    }

    /// Mark the payout as completed on the given date
    pub fn with_payout(mut self, date: NaiveDate) -> Self {
        self.payout_status = true;
        self.payout_date = Some(date);
        self
    }

    /// Label used for the payout status column
    pub fn payout_label(&self) -> &'static str {
        if self.payout_status {
            "Completed"
        } else {
            "Pending"
        }
    }
}

/// A single recorded contribution event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier for the payment
    pub id: String,
    /// Member who made (or missed) the payment
    pub member_id: String,
    /// When the payment was recorded; only the date part is significant
    pub date: NaiveDateTime,
    /// Whether the contribution was actually paid
    pub paid: bool,
}

impl Payment {
    /// Create a new payment record
    pub fn new(id: String, member_id: String, date: NaiveDateTime, paid: bool) -> Self {
        Self {
            id,
            member_id,
            date,
            paid,
        }
    }

    /// Record a payment with a generated identifier
    pub fn record(member_id: String, date: NaiveDateTime, paid: bool) -> Self {
        Self::new(uuid::Uuid::new_v4().to_string(), member_id, date, paid)
    }

    /// Calendar date of the payment, time-of-day dropped
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Display band for a member's payment percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentageBand {
    /// 80% or more
    Good,
    /// Between 50% and 80%
    Neutral,
    /// Below 50%
    Poor,
}

impl PercentageBand {
    /// Classify a percentage
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage >= 80 {
            PercentageBand::Good
        } else if percentage < 50 {
            PercentageBand::Poor
        } else {
            PercentageBand::Neutral
        }
    }

    /// CSS class name used by the document renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            PercentageBand::Good => "good",
            PercentageBand::Neutral => "neutral",
            PercentageBand::Poor => "poor",
        }
    }
}

/// Per-member figures derived from the schedule and the payment log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberAggregate {
    /// Member these figures belong to
    pub member_id: String,
    /// Scheduled dates with a matching paid record
    pub paid_count: u32,
    /// Number of scheduled dates
    pub expected_count: u32,
    /// `floor(paid / expected * 100)`, or 0 without expected dates
    pub percentage: u32,
    /// Display band for `percentage`
    pub band: PercentageBand,
    /// `paid_count * committee.amount`
    pub total_paid: BigDecimal,
}

impl MemberAggregate {
    /// The "paid/expected" fraction shown by both renderers
    pub fn fraction(&self) -> String {
        format!("{}/{}", self.paid_count, self.expected_count)
    }
}

/// Committee-wide figures, always summed from [`MemberAggregate`] records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeTotals {
    /// Number of members in the report
    pub member_count: u32,
    /// Number of scheduled cycles
    pub cycle_count: u32,
    /// Paid events across all members
    pub total_paid: u64,
    /// `member_count * cycle_count`
    pub total_expected: u64,
    /// Paid share of expected events, one decimal, or `"0"`
    pub collection_rate: String,
    /// Amount collected across all members
    pub total_collected: BigDecimal,
    /// Amount still outstanding across all members
    pub total_pending: BigDecimal,
    /// Members whose payout is completed
    pub payouts_completed: u32,
}

/// One member row of a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRow {
    /// Member as loaded from storage
    pub member: Member,
    /// Figures computed for this member
    pub aggregate: MemberAggregate,
}

/// Canonical result of a report run, consumed by every renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeReport {
    /// Committee being reported on
    pub committee: Committee,
    /// Expected contribution dates
    pub schedule: Vec<NaiveDate>,
    /// Members ordered by payout order, with their figures
    pub rows: Vec<MemberRow>,
    /// Committee-wide figures
    pub totals: CommitteeTotals,
    /// Timestamp printed on the outputs
    pub generated_at: NaiveDateTime,
}

/// Finished output handed to a delivery collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    /// Encoded document or text
    pub bytes: Vec<u8>,
    /// Suggested file name
    pub file_name: String,
    /// MIME type of `bytes`
    pub mime_type: &'static str,
}

/// Errors that can occur while producing a report
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Committee not found: {0}")]
    CommitteeNotFound(String),
    #[error("Render error: {0}")]
    Render(String),
    #[error("Export error: {0}")]
    Export(String),
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl From<csv::Error> for ReportError {
    fn from(err: csv::Error) -> Self {
        ReportError::Export(err.to_string())
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Export(err.to_string())
    }
}

/// Result type for report operations
pub type ReportResult<T> = Result<T, ReportError>;
