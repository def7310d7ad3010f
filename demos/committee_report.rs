//! Committee report example

use committee_report::utils::{MemoryDelivery, MemoryStorage};
use committee_report::{Committee, Frequency, Member, Payment, ReportEngine, ReportOptions};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Committee Report Example\n");

    let storage = MemoryStorage::new();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("invalid start date")?;

    // 1. A monthly committee with three members
    storage.save_committee(Committee::new(
        "family".to_string(),
        "Family Fund".to_string(),
        "FF-01".to_string(),
        BigDecimal::from(5000),
        Frequency::Monthly,
        start.and_hms_opt(0, 0, 0).ok_or("invalid time")?,
    ))?;

    let names = ["Ayesha Khan", "Bilal Ahmed", "Sara Malik"];
    for (i, name) in names.iter().enumerate() {
        let order = i as u32 + 1;
        let mut member = Member::new(
            format!("m{order}"),
            "family".to_string(),
            name.to_string(),
            format!("0300-000000{order}"),
            order,
        );
        if order == 1 {
            member = member.with_payout(NaiveDate::from_ymd_opt(2024, 2, 10).ok_or("invalid date")?);
        }
        storage.save_member(member)?;
    }

    // 2. Record payments; Sara misses March and April
    for month in 1..=4 {
        let day = NaiveDate::from_ymd_opt(2024, month, 1).ok_or("invalid date")?;
        let paid_at = day.and_hms_opt(18, 0, 0).ok_or("invalid time")?;
        for member in ["m1", "m2", "m3"] {
            let paid = !(member == "m3" && month > 2);
            storage.save_payment(Payment::record(member.to_string(), paid_at, paid))?;
        }
    }

    // 3. Build the report as of 1 April 2024
    let engine = ReportEngine::new(storage);
    let as_of = NaiveDate::from_ymd_opt(2024, 4, 1).ok_or("invalid date")?;
    let options = ReportOptions::until(as_of);
    let report = engine.build_report("family", &options).await?;

    println!("Schedule: {} cycles", report.totals.cycle_count);
    for row in &report.rows {
        println!(
            "  #{} {:<12} {} ({}%, {:?})",
            row.member.payout_order,
            row.member.name,
            row.aggregate.fraction(),
            row.aggregate.percentage,
            row.aggregate.band
        );
    }
    println!(
        "Collection rate: {}% | collected {} | pending {}\n",
        report.totals.collection_rate, report.totals.total_collected, report.totals.total_pending
    );

    // 4. Render both outputs and hand them to a delivery sink
    let sink = MemoryDelivery::new();
    engine.deliver_all("family", &options, &sink).await?;

    for delivered in sink.delivered()? {
        println!(
            "  Delivered {} ({} bytes) - {}",
            delivered.report.file_name,
            delivered.report.bytes.len(),
            delivered.subject
        );
    }

    Ok(())
}
