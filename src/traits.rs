//! Traits for storage, delivery and rendering abstraction

use async_trait::async_trait;

use crate::types::*;

/// Data-access abstraction for committee records
///
/// The engine only ever reads through this trait, so any persistence layer
/// (SQLite, a remote API, in-memory, etc.) can back a report run.
#[async_trait]
pub trait CommitteeStorage: Send + Sync {
    /// Get a committee by ID
    async fn get_committee(&self, committee_id: &str) -> ReportResult<Option<Committee>>;

    /// List the members of a committee, in whatever order the backend keeps them
    async fn get_members_by_committee(&self, committee_id: &str) -> ReportResult<Vec<Member>>;

    /// List every payment recorded for members of a committee
    ///
    /// The returned order decides which record wins when several share a
    /// member and a date.
    async fn get_payments_by_committee(&self, committee_id: &str) -> ReportResult<Vec<Payment>>;
}

/// Hands a finished output to the platform (save, share, print)
#[async_trait]
pub trait ReportDelivery: Send + Sync {
    /// Deliver a rendered report under a suggested name and subject
    async fn deliver(&self, report: &RenderedReport, subject: &str) -> ReportResult<()>;
}

/// Turns a [`CommitteeReport`] into an encoded output
pub trait ReportRenderer {
    /// Render the report into bytes plus a suggested file name
    fn render(&self, report: &CommitteeReport) -> ReportResult<RenderedReport>;
}
