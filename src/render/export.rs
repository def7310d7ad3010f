//! Flat delimited-text export

use csv::WriterBuilder;

use crate::format::{file_stem, format_amount, format_date, format_timestamp, title_case};
use crate::traits::ReportRenderer;
use crate::types::*;

/// MIME type of the exported text
pub const CSV_MIME_TYPE: &str = "text/csv; charset=utf-8";

/// Placeholder for a payout that has not happened yet
pub const NO_DATE: &str = "-";

/// Column names of the member detail block
pub const DETAIL_HEADER: [&str; 8] = [
    "Order",
    "Name",
    "Contact",
    "Paid/Expected",
    "Percentage",
    "Total Paid",
    "Payout Status",
    "Payout Date",
];

/// Exports a [`CommitteeReport`] as comma-separated rows
#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    include_totals_row: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CsvExporter {
    /// Create an exporter, optionally appending a totals row
    pub fn new(include_totals_row: bool) -> Self {
        Self { include_totals_row }
    }

    /// Lay the report out as rows of cells
    pub fn rows(&self, report: &CommitteeReport) -> Vec<Vec<String>> {
        let committee = &report.committee;
        let totals = &report.totals;

        let mut rows = vec![
            vec![format!("{} Committee Report", committee.name)],
            vec!["Code".to_string(), committee.code.clone()],
            vec![
                "Generated".to_string(),
                format_timestamp(report.generated_at),
            ],
        ];

        let summary = [
            ("Contribution Amount", format_amount(&committee.amount)),
            ("Frequency", title_case(committee.frequency.label())),
            ("Start Date", format_date(committee.start_date.date())),
            ("Members", totals.member_count.to_string()),
            ("Cycles", totals.cycle_count.to_string()),
            ("Collection Rate", format!("{}%", totals.collection_rate)),
            ("Total Collected", format_amount(&totals.total_collected)),
            ("Total Pending", format_amount(&totals.total_pending)),
            (
                "Payouts Completed",
                format!("{}/{}", totals.payouts_completed, totals.member_count),
            ),
        ];
        rows.extend(
            summary
                .into_iter()
                .map(|(key, value)| vec![key.to_string(), value]),
        );

        rows.push(Vec::new());
        rows.push(DETAIL_HEADER.iter().map(|c| c.to_string()).collect());

        for row in &report.rows {
            let member = &row.member;
            let figures = &row.aggregate;
            rows.push(vec![
                member.payout_order.to_string(),
                member.name.clone(),
                member.contact.clone(),
                figures.fraction(),
                format!("{}%", figures.percentage),
                format_amount(&figures.total_paid),
                member.payout_label().to_string(),
                member
                    .payout_date
                    .filter(|_| member.payout_status)
                    .map(format_date)
                    .unwrap_or_else(|| NO_DATE.to_string()),
            ]);
        }

        if self.include_totals_row {
            rows.push(vec![
                "TOTAL".to_string(),
                String::new(),
                String::new(),
                format!("{}/{}", totals.total_paid, totals.total_expected),
                format!("{}%", totals.collection_rate),
                format_amount(&totals.total_collected),
                format!("{}/{}", totals.payouts_completed, totals.member_count),
                String::new(),
            ]);
        }

        rows
    }

    /// Encode the report as CSV bytes
    pub fn to_bytes(&self, report: &CommitteeReport) -> ReportResult<Vec<u8>> {
        let mut wtr = WriterBuilder::new().flexible(true).from_writer(Vec::new());
        for row in self.rows(report) {
            if row.is_empty() {
                wtr.write_record([""])?;
            } else {
                wtr.write_record(&row)?;
            }
        }
        wtr.into_inner()
            .map_err(|e| ReportError::Export(e.to_string()))
    }
}

impl ReportRenderer for CsvExporter {
    fn render(&self, report: &CommitteeReport) -> ReportResult<RenderedReport> {
        let bytes = self.to_bytes(report)?;

        tracing::info!(
            committee_id = %report.committee.id,
            rows = report.rows.len(),
            bytes = bytes.len(),
            "exported committee csv"
        );

        Ok(RenderedReport {
            bytes,
            file_name: format!("{}_Report.csv", file_stem(&report.committee.name)),
            mime_type: CSV_MIME_TYPE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_report;
    use csv::ReaderBuilder;

    fn parse(bytes: &[u8]) -> Vec<Vec<String>> {
        ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes)
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    fn find<'a>(rows: &'a [Vec<String>], first: &str) -> &'a Vec<String> {
        rows.iter().find(|r| r[0] == first).unwrap()
    }

    #[test]
    fn test_export_layout() {
        let rendered = CsvExporter::default().render(&sample_report()).unwrap();
        assert_eq!(rendered.file_name, "Family_Fund_Report.csv");
        assert_eq!(rendered.mime_type, CSV_MIME_TYPE);

        let rows = parse(&rendered.bytes);
        assert_eq!(rows[0], vec!["Family Fund Committee Report"]);
        assert_eq!(find(&rows, "Generated")[1], "01 Apr 2024 18:30");
        assert_eq!(find(&rows, "Collection Rate")[1], "66.7%");
        assert_eq!(find(&rows, "Total Collected")[1], "40000");
        assert_eq!(find(&rows, "Total Pending")[1], "20000");
        assert_eq!(find(&rows, "Frequency")[1], "Monthly");

        let header = find(&rows, "Order");
        assert_eq!(header.len(), DETAIL_HEADER.len());
    }

    #[test]
    fn test_single_separator_before_detail() {
        let rows = parse(&CsvExporter::default().to_bytes(&sample_report()).unwrap());
        let generated = rows.iter().position(|r| r[0] == "Generated").unwrap();
        let header = rows.iter().position(|r| r[0] == "Order").unwrap();
        let blanks: Vec<usize> = rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.iter().all(|field| field.is_empty()))
            .map(|(i, _)| i)
            .collect();

        assert_eq!(rows[generated + 1][0], "Contribution Amount");
        assert_eq!(blanks, vec![header - 1]);
    }

    #[test]
    fn test_member_rows() {
        let rows = parse(&CsvExporter::default().to_bytes(&sample_report()).unwrap());

        assert_eq!(
            find(&rows, "1"),
            &vec![
                "1",
                "Ayesha Khan",
                "0300-1111111",
                "3/4",
                "75%",
                "15000",
                "Completed",
                "15 Feb 2024"
            ]
        );
        assert_eq!(find(&rows, "2")[7], NO_DATE);
        assert_eq!(find(&rows, "3")[4], "25%");
        assert_eq!(find(&rows, "TOTAL")[3], "8/12");
    }

    #[test]
    fn test_totals_row_optional() {
        let rows = parse(&CsvExporter::new(false).to_bytes(&sample_report()).unwrap());
        assert!(rows.iter().all(|r| r[0] != "TOTAL"));
    }

    #[test]
    fn test_quoting() {
        let mut report = sample_report();
        report.rows[1].member.name = "Khan, \"Bilal\"".to_string();
        let bytes = CsvExporter::default().to_bytes(&report).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();

        assert!(text.contains("\"Khan, \"\"Bilal\"\"\""));
        assert_eq!(find(&parse(&bytes), "2")[1], "Khan, \"Bilal\"");
    }
}
