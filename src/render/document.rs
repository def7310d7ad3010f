//! Print-ready document rendering
//!
//! Produces a self-contained HTML document laid out for A4 pages. Printing
//! or converting it to PDF is left to the delivery collaborator.

use std::fmt::Write;

use crate::format::{file_stem, format_amount, format_date, format_timestamp, title_case};
use crate::traits::ReportRenderer;
use crate::types::*;

/// MIME type of the rendered document
pub const DOCUMENT_MIME_TYPE: &str = "text/html; charset=utf-8";

const STYLE: &str = r#"
* { box-sizing: border-box; }
body { font-family: Helvetica, Arial, sans-serif; color: #111827; font-size: 11px; margin: 0; }
header { border-bottom: 2px solid #1d4ed8; padding-bottom: 8px; margin-bottom: 14px; }
header h1 { margin: 0; font-size: 20px; color: #1d4ed8; }
header .code { color: #6b7280; font-size: 12px; }
h2 { font-size: 14px; margin: 18px 0 8px; }
.summary { display: grid; grid-template-columns: repeat(4, 1fr); gap: 8px; }
.summary .item { background: #f3f4f6; border-radius: 6px; padding: 8px; }
.summary .label { color: #6b7280; font-size: 9px; text-transform: uppercase; }
.summary .value { font-size: 13px; font-weight: bold; }
table { width: 100%; border-collapse: collapse; }
thead { display: table-header-group; }
tr { page-break-inside: avoid; }
th { background: #1d4ed8; color: #fff; text-align: left; padding: 6px; font-size: 10px; }
td { border-bottom: 1px solid #e5e7eb; padding: 6px; }
tr.totals td { font-weight: bold; background: #eff6ff; border-top: 2px solid #1d4ed8; }
.good { color: #15803d; font-weight: bold; }
.poor { color: #b91c1c; font-weight: bold; }
.neutral { color: #92400e; }
.cards { display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px; }
.card { border: 1px solid #e5e7eb; border-radius: 6px; padding: 8px; page-break-inside: avoid; }
.card .order { font-size: 16px; font-weight: bold; color: #1d4ed8; }
.badge { float: right; border-radius: 10px; padding: 2px 8px; font-size: 9px; }
.badge.completed { background: #dcfce7; color: #15803d; }
.badge.pending { background: #fef3c7; color: #92400e; }
footer { margin-top: 18px; color: #6b7280; font-size: 9px; text-align: center; }
"#;

/// Renders a [`CommitteeReport`] as an A4 HTML document
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Create a new document renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the document markup
    pub fn render_html(&self, report: &CommitteeReport) -> Result<String, std::fmt::Error> {
        let committee = &report.committee;
        let totals = &report.totals;
        let mut html = String::with_capacity(8 * 1024);

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\"><head><meta charset=\"utf-8\">")?;
        writeln!(
            html,
            "<title>{} Report</title><style>{}{}</style></head><body>",
            escape(&committee.name),
            page_rule(committee),
            STYLE
        )?;

        // Header
        writeln!(
            html,
            "<header><h1>{}</h1><div class=\"code\">Code: {}</div></header>",
            escape(&committee.name),
            escape(&committee.code)
        )?;

        // Summary panel
        let summary = [
            ("Contribution", format_amount(&committee.amount)),
            ("Frequency", title_case(committee.frequency.label())),
            ("Members", totals.member_count.to_string()),
            ("Collection Rate", format!("{}%", totals.collection_rate)),
            ("Total Collected", format_amount(&totals.total_collected)),
            (
                "Payouts Completed",
                format!("{}/{}", totals.payouts_completed, totals.member_count),
            ),
            ("Cycles", totals.cycle_count.to_string()),
            ("Pending Amount", format_amount(&totals.total_pending)),
        ];
        writeln!(html, "<h2>Summary</h2><section class=\"summary\">")?;
        for (label, value) in &summary {
            writeln!(
                html,
                "<div class=\"item\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>",
                label,
                escape(value)
            )?;
        }
        writeln!(html, "</section>")?;

        // Member table
        writeln!(html, "<h2>Member Payments</h2><table><thead><tr>")?;
        for column in [
            "#", "Name", "Contact", "Paid", "Percentage", "Total Paid", "Payout",
        ] {
            write!(html, "<th>{}</th>", column)?;
        }
        writeln!(html, "</tr></thead><tbody>")?;
        for row in &report.rows {
            let member = &row.member;
            let figures = &row.aggregate;
            writeln!(
                html,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"{}\">{}%</td><td>{}</td><td>{}</td></tr>",
                member.payout_order,
                escape(&member.name),
                escape(&member.contact),
                figures.fraction(),
                figures.band.css_class(),
                figures.percentage,
                format_amount(&figures.total_paid),
                member.payout_label()
            )?;
        }
        writeln!(
            html,
            "<tr class=\"totals\"><td colspan=\"3\">Total</td><td>{}/{}</td><td>{}%</td><td>{}</td><td>{}/{}</td></tr>",
            totals.total_paid,
            totals.total_expected,
            totals.collection_rate,
            format_amount(&totals.total_collected),
            totals.payouts_completed,
            totals.member_count
        )?;
        writeln!(html, "</tbody></table>")?;

        // Payout schedule cards
        writeln!(html, "<h2>Payout Schedule</h2><section class=\"cards\">")?;
        for row in &report.rows {
            let member = &row.member;
            let status = if member.payout_status { "completed" } else { "pending" };
            write!(
                html,
                "<div class=\"card\"><span class=\"badge {}\">{}</span><div class=\"order\">#{}</div><div>{}</div>",
                status,
                member.payout_label(),
                member.payout_order,
                escape(&member.name)
            )?;
            if let Some(date) = member.payout_date.filter(|_| member.payout_status) {
                write!(html, "<div class=\"date\">Paid out {}</div>", format_date(date))?;
            }
            writeln!(html, "</div>")?;
        }
        writeln!(html, "</section>")?;

        writeln!(
            html,
            "<footer>Generated on {} &middot; {} ({})</footer>",
            format_timestamp(report.generated_at),
            escape(&committee.name),
            escape(&committee.code)
        )?;
        writeln!(html, "</body></html>")?;

        Ok(html)
    }
}

impl ReportRenderer for DocumentRenderer {
    fn render(&self, report: &CommitteeReport) -> ReportResult<RenderedReport> {
        let html = self
            .render_html(report)
            .map_err(|e| ReportError::Render(e.to_string()))?;

        tracing::info!(
            committee_id = %report.committee.id,
            bytes = html.len(),
            "rendered committee document"
        );

        Ok(RenderedReport {
            bytes: html.into_bytes(),
            file_name: format!("{}_Report.html", file_stem(&report.committee.name)),
            mime_type: DOCUMENT_MIME_TYPE,
        })
    }
}

/// `@page` rule repeating committee name, code and page counter on every page
fn page_rule(committee: &Committee) -> String {
    format!(
        "\n@page {{ size: A4; margin: 12mm; \
         @top-left {{ content: \"{} · {}\"; font-size: 9px; color: #6b7280; }} \
         @top-right {{ content: \"Page \" counter(page) \" of \" counter(pages); font-size: 9px; color: #6b7280; }} }}",
        css_string(&committee.name),
        css_string(&committee.code)
    )
}

/// Escape text for use inside a double-quoted CSS string within `<style>`
pub fn css_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '<' => escaped.push_str("\\3C "),
            '>' => escaped.push_str("\\3E "),
            '&' => escaped.push_str("\\26 "),
            '\n' | '\r' => escaped.push_str("\\A "),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_report;

    #[test]
    fn test_document_sections() {
        let report = sample_report();
        let rendered = DocumentRenderer::new().render(&report).unwrap();
        let html = String::from_utf8(rendered.bytes).unwrap();

        assert_eq!(rendered.file_name, "Family_Fund_Report.html");
        assert_eq!(rendered.mime_type, DOCUMENT_MIME_TYPE);
        assert!(html.contains("size: A4"));
        assert!(html.contains("counter(page)"));
        assert!(html.contains("<h1>Family Fund</h1>"));
        assert!(html.contains("Code: FF-01"));
        assert!(html.contains("Member Payments"));
        assert!(html.contains("Payout Schedule"));
        assert!(html.contains("Generated on 01 Apr 2024 18:30"));
    }

    #[test]
    fn test_percentage_highlight_classes() {
        let html = DocumentRenderer::new()
            .render_html(&sample_report())
            .unwrap();

        assert!(html.contains("<td class=\"neutral\">75%</td>"));
        assert!(html.contains("<td class=\"good\">100%</td>"));
        assert!(html.contains("<td class=\"poor\">25%</td>"));
    }

    #[test]
    fn test_totals_row_and_cards() {
        let html = DocumentRenderer::new()
            .render_html(&sample_report())
            .unwrap();

        assert!(html.contains("<td>8/12</td><td>66.7%</td><td>40000</td>"));
        assert!(html.contains("Paid out 15 Feb 2024"));
        assert_eq!(html.matches("class=\"card\"").count(), 3);
    }

    fn page_rule_of(html: &str) -> &str {
        let start = html.find("@page").unwrap();
        let end = html[start..].find("\n").map_or(html.len(), |i| start + i);
        &html[start..end]
    }

    #[test]
    fn test_page_header_repeats_name_and_code() {
        let html = DocumentRenderer::new()
            .render_html(&sample_report())
            .unwrap();
        let rule = page_rule_of(&html);

        assert!(rule.contains("@top-left { content: \"Family Fund · FF-01\""));
        assert!(rule.contains("@top-right"));
        assert!(rule.contains("counter(pages)"));
    }

    #[test]
    fn test_page_header_escapes_css_string() {
        let mut report = sample_report();
        report.committee.name = "Ali \"Big\" Pool</style>".to_string();
        report.committee.code = "A\\B".to_string();
        let html = DocumentRenderer::new().render_html(&report).unwrap();
        let rule = page_rule_of(&html);

        assert!(rule.contains(r#"content: "Ali \"Big\" Pool\3C /style\3E  · A\\B""#));
        assert_eq!(html.matches("</style>").count(), 1);
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut report = sample_report();
        report.rows[0].member.name = "<b>Tom & \"Jerry\"</b>".to_string();
        let html = DocumentRenderer::new().render_html(&report).unwrap();

        assert!(html.contains("&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>Tom"));
    }
}
