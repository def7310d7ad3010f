//! Per-member and committee-wide statistics

use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::format::{collection_rate, floor_percentage};
use crate::matching::PaymentIndex;
use crate::types::*;

/// Compute per-member figures and committee totals.
///
/// `members` must already be ordered by payout order; records come back in
/// the same order. Totals are summed from the per-member records so that
/// every renderer shows the same numbers.
pub fn aggregate(
    committee: &Committee,
    members: &[Member],
    payments: &[Payment],
    schedule: &[NaiveDate],
) -> (Vec<MemberAggregate>, CommitteeTotals) {
    let index = PaymentIndex::new(payments);
    let expected_count = count_u32(schedule.len());

    let records: Vec<MemberAggregate> = members
        .iter()
        .map(|member| {
            let paid_count = count_u32(index.paid_count(&member.id, schedule));
            member_aggregate(committee, &member.id, paid_count, expected_count)
        })
        .collect();

    let totals = summarize(committee, members, &records, expected_count);

    tracing::debug!(
        committee_id = %committee.id,
        members = members.len(),
        cycles = schedule.len(),
        payments = payments.len(),
        total_paid = totals.total_paid,
        "aggregated committee payments"
    );

    (records, totals)
}

/// Build the figures of one member from its counts
pub fn member_aggregate(
    committee: &Committee,
    member_id: &str,
    paid_count: u32,
    expected_count: u32,
) -> MemberAggregate {
    let percentage = floor_percentage(u64::from(paid_count), u64::from(expected_count));
    MemberAggregate {
        member_id: member_id.to_string(),
        paid_count,
        expected_count,
        percentage,
        band: PercentageBand::from_percentage(percentage),
        total_paid: &committee.amount * BigDecimal::from(paid_count),
    }
}

/// Sum per-member records into committee totals
pub fn summarize(
    committee: &Committee,
    members: &[Member],
    records: &[MemberAggregate],
    cycle_count: u32,
) -> CommitteeTotals {
    let total_paid: u64 = records.iter().map(|r| u64::from(r.paid_count)).sum();
    let total_expected: u64 = records.iter().map(|r| u64::from(r.expected_count)).sum();
    let total_collected: BigDecimal = records.iter().map(|r| &r.total_paid).sum();
    let total_pending = &committee.amount * BigDecimal::from(total_expected - total_paid);

    CommitteeTotals {
        member_count: count_u32(records.len()),
        cycle_count,
        total_paid,
        total_expected,
        collection_rate: collection_rate(total_paid, total_expected),
        total_collected,
        total_pending,
        payouts_completed: count_u32(members.iter().filter(|m| m.payout_status).count()),
    }
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generate_schedule;
    use proptest::prelude::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn committee() -> Committee {
        Committee::new(
            "c1".to_string(),
            "Family Fund".to_string(),
            "FF-01".to_string(),
            BigDecimal::from(5000),
            Frequency::Monthly,
            ymd(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap(),
        )
    }

    fn member(id: &str, order: u32) -> Member {
        Member::new(
            id.to_string(),
            "c1".to_string(),
            format!("Member {order}"),
            format!("0300-00000{order}"),
            order,
        )
    }

    fn paid_on(member_id: &str, dates: &[NaiveDate]) -> Vec<Payment> {
        dates
            .iter()
            .map(|d| Payment::record(member_id.to_string(), d.and_hms_opt(10, 0, 0).unwrap(), true))
            .collect()
    }

    #[test]
    fn test_member_percentages_and_bands() {
        let c = committee();
        let schedule = generate_schedule(&c, None, Some(ymd(2024, 4, 1)));
        assert_eq!(schedule.len(), 4);

        let members = vec![member("m1", 1), member("m2", 2), member("m3", 3)];
        let mut payments = paid_on("m1", &schedule[..3]);
        payments.extend(paid_on("m2", &schedule));
        payments.extend(paid_on("m3", &schedule[..1]));

        let (records, totals) = aggregate(&c, &members, &payments, &schedule);

        assert_eq!(records[0].percentage, 75);
        assert_eq!(records[0].band, PercentageBand::Neutral);
        assert_eq!(records[0].fraction(), "3/4");
        assert_eq!(records[1].percentage, 100);
        assert_eq!(records[1].band, PercentageBand::Good);
        assert_eq!(records[2].percentage, 25);
        assert_eq!(records[2].band, PercentageBand::Poor);

        assert_eq!(totals.total_paid, 8);
        assert_eq!(totals.total_expected, 12);
        assert_eq!(totals.collection_rate, "66.7");
        assert_eq!(totals.total_collected, BigDecimal::from(40000));
        assert_eq!(totals.total_pending, BigDecimal::from(20000));
        assert_eq!(totals.cycle_count, 4);
        assert_eq!(totals.member_count, 3);
    }

    #[test]
    fn test_no_members() {
        let c = committee();
        let schedule = generate_schedule(&c, None, Some(ymd(2024, 4, 1)));
        let (records, totals) = aggregate(&c, &[], &[], &schedule);

        assert!(records.is_empty());
        assert_eq!(totals.collection_rate, "0");
        assert_eq!(totals.total_collected, BigDecimal::from(0));
        assert_eq!(totals.total_pending, BigDecimal::from(0));
    }

    #[test]
    fn test_empty_schedule() {
        let c = committee();
        let members = vec![member("m1", 1)];
        let payments = paid_on("m1", &[ymd(2024, 1, 1)]);
        let (records, totals) = aggregate(&c, &members, &payments, &[]);

        assert_eq!(records[0].percentage, 0);
        assert_eq!(records[0].expected_count, 0);
        assert_eq!(totals.collection_rate, "0");
    }

    #[test]
    fn test_out_of_range_and_unpaid_records_are_ignored() {
        let c = committee();
        let schedule = generate_schedule(&c, None, Some(ymd(2024, 2, 1)));
        let members = vec![member("m1", 1)];
        let payments = vec![
            Payment::record("m1".to_string(), ymd(2023, 12, 1).and_hms_opt(9, 0, 0).unwrap(), true),
            Payment::record("m1".to_string(), ymd(2024, 1, 1).and_hms_opt(9, 0, 0).unwrap(), false),
            Payment::record("m1".to_string(), ymd(2024, 2, 1).and_hms_opt(9, 0, 0).unwrap(), true),
            Payment::record("ghost".to_string(), ymd(2024, 1, 1).and_hms_opt(9, 0, 0).unwrap(), true),
        ];

        let (records, totals) = aggregate(&c, &members, &payments, &schedule);
        assert_eq!(records[0].paid_count, 1);
        assert_eq!(records[0].percentage, 50);
        assert_eq!(totals.collection_rate, "50.0");
    }

    #[test]
    fn test_payouts_completed() {
        let c = committee();
        let members = vec![
            member("m1", 1).with_payout(ymd(2024, 1, 15)),
            member("m2", 2),
        ];
        let (_, totals) = aggregate(&c, &members, &[], &[ymd(2024, 1, 1)]);
        assert_eq!(totals.payouts_completed, 1);
    }

    #[test]
    fn test_rerun_is_identical() {
        let c = committee();
        let schedule = generate_schedule(&c, None, Some(ymd(2024, 6, 1)));
        let members = vec![member("m1", 1), member("m2", 2)];
        let payments = paid_on("m2", &schedule[1..4]);

        assert_eq!(
            aggregate(&c, &members, &payments, &schedule),
            aggregate(&c, &members, &payments, &schedule)
        );
    }

    proptest! {
        #[test]
        fn prop_totals_are_sums_of_records(
            paid_masks in prop::collection::vec(prop::collection::vec(any::<bool>(), 6), 0..8),
        ) {
            let c = committee();
            let schedule = generate_schedule(&c, None, Some(ymd(2024, 6, 1)));
            let members: Vec<Member> = (0..paid_masks.len())
                .map(|i| member(&format!("m{i}"), i as u32 + 1))
                .collect();
            let payments: Vec<Payment> = paid_masks
                .iter()
                .enumerate()
                .flat_map(|(i, mask)| {
                    schedule
                        .iter()
                        .zip(mask)
                        .filter(|(_, paid)| **paid)
                        .map(move |(d, _)| {
                            Payment::record(format!("m{i}"), d.and_hms_opt(8, 0, 0).unwrap(), true)
                        })
                })
                .collect();

            let (records, totals) = aggregate(&c, &members, &payments, &schedule);

            let paid_sum: u64 = records.iter().map(|r| u64::from(r.paid_count)).sum();
            prop_assert_eq!(totals.total_paid, paid_sum);
            prop_assert_eq!(
                totals.total_collected.clone(),
                &c.amount * BigDecimal::from(totals.total_paid)
            );
            prop_assert!(records.iter().all(|r| r.percentage <= 100));
            prop_assert!(records.iter().all(|r| r.expected_count == totals.cycle_count));
        }
    }
}
