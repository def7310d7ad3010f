//! Report orchestrator that coordinates storage, aggregation and rendering

use crate::aggregate::aggregate;
use crate::config::ReportOptions;
use crate::render::{CsvExporter, DocumentRenderer};
use crate::schedule::generate_schedule;
use crate::traits::*;
use crate::types::*;

/// Builds committee reports from a storage backend
pub struct ReportEngine<S: CommitteeStorage> {
    storage: S,
}

impl<S: CommitteeStorage> ReportEngine<S> {
    /// Create a new engine over the given storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load a committee and compute its report
    pub async fn build_report(
        &self,
        committee_id: &str,
        options: &ReportOptions,
    ) -> ReportResult<CommitteeReport> {
        let committee = self
            .storage
            .get_committee(committee_id)
            .await?
            .ok_or_else(|| ReportError::CommitteeNotFound(committee_id.to_string()))?;

        let mut members = self.storage.get_members_by_committee(committee_id).await?;
        members.sort_by_key(|member| member.payout_order);
        let payments = self.storage.get_payments_by_committee(committee_id).await?;

        let generated_at = options.timestamp();
        let schedule = generate_schedule(
            &committee,
            options.start,
            Some(options.end_date(generated_at)),
        );
        let (records, totals) = aggregate(&committee, &members, &payments, &schedule);

        let rows = members
            .into_iter()
            .zip(records)
            .map(|(member, aggregate)| MemberRow { member, aggregate })
            .collect();

        Ok(CommitteeReport {
            committee,
            schedule,
            rows,
            totals,
            generated_at,
        })
    }

    /// Build a report and render it as a print-ready document
    pub async fn render_document(
        &self,
        committee_id: &str,
        options: &ReportOptions,
    ) -> ReportResult<RenderedReport> {
        let report = self.build_report(committee_id, options).await?;
        DocumentRenderer::new().render(&report)
    }

    /// Build a report and export it as CSV
    pub async fn export_csv(
        &self,
        committee_id: &str,
        options: &ReportOptions,
    ) -> ReportResult<RenderedReport> {
        let report = self.build_report(committee_id, options).await?;
        CsvExporter::new(options.include_totals_row).render(&report)
    }

    /// Render the document and hand it to a delivery collaborator
    pub async fn deliver_document<D: ReportDelivery>(
        &self,
        committee_id: &str,
        options: &ReportOptions,
        delivery: &D,
    ) -> ReportResult<RenderedReport> {
        let report = self.build_report(committee_id, options).await?;
        deliver_report(&report, &DocumentRenderer::new(), delivery).await
    }

    /// Export the CSV and hand it to a delivery collaborator
    pub async fn deliver_csv<D: ReportDelivery>(
        &self,
        committee_id: &str,
        options: &ReportOptions,
        delivery: &D,
    ) -> ReportResult<RenderedReport> {
        let report = self.build_report(committee_id, options).await?;
        let exporter = CsvExporter::new(options.include_totals_row);
        deliver_report(&report, &exporter, delivery).await
    }

    /// Build the report once and deliver both the document and the CSV.
    ///
    /// Both outputs are rendered from the same [`CommitteeReport`], so they
    /// share one "now" and one set of figures.
    pub async fn deliver_all<D: ReportDelivery>(
        &self,
        committee_id: &str,
        options: &ReportOptions,
        delivery: &D,
    ) -> ReportResult<(RenderedReport, RenderedReport)> {
        let report = self.build_report(committee_id, options).await?;
        let document = deliver_report(&report, &DocumentRenderer::new(), delivery).await?;
        let exporter = CsvExporter::new(options.include_totals_row);
        let csv = deliver_report(&report, &exporter, delivery).await?;
        Ok((document, csv))
    }
}

/// Render an already built report and hand it to a delivery collaborator
pub async fn deliver_report<R: ReportRenderer, D: ReportDelivery>(
    report: &CommitteeReport,
    renderer: &R,
    delivery: &D,
) -> ReportResult<RenderedReport> {
    let rendered = renderer.render(report)?;
    deliver(delivery, &report.committee, rendered).await
}

/// Subject line used when sharing a committee report
pub fn report_subject(committee: &Committee) -> String {
    format!("{} ({}) Committee Report", committee.name, committee.code)
}

async fn deliver<D: ReportDelivery>(
    delivery: &D,
    committee: &Committee,
    rendered: RenderedReport,
) -> ReportResult<RenderedReport> {
    let subject = report_subject(committee);
    match delivery.deliver(&rendered, &subject).await {
        Ok(()) => {
            tracing::info!(
                committee_id = %committee.id,
                file_name = %rendered.file_name,
                "delivered committee report"
            );
            Ok(rendered)
        }
        Err(e) => {
            tracing::warn!(
                committee_id = %committee.id,
                file_name = %rendered.file_name,
                error = %e,
                "committee report delivery failed"
            );
            Err(e)
        }
    }
}
