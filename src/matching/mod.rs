//! Matching recorded payments against expected contribution dates

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::types::Payment;

/// Find the first payment of a member recorded on a given calendar date.
///
/// Time-of-day is ignored. Collection order decides between duplicates.
pub fn find_payment<'a>(
    payments: &'a [Payment],
    member_id: &str,
    date: NaiveDate,
) -> Option<&'a Payment> {
    payments
        .iter()
        .find(|payment| payment.member_id == member_id && payment.day() == date)
}

/// Whether a member paid on a given date.
///
/// Only the first matching record counts: a later paid duplicate does not
/// override an earlier unpaid one.
pub fn is_paid(payments: &[Payment], member_id: &str, date: NaiveDate) -> bool {
    find_payment(payments, member_id, date).is_some_and(|payment| payment.paid)
}

/// Payments indexed by member and date, keeping first-match semantics
///
/// Lookups give the same answers as [`is_paid`] without scanning the whole
/// payment log for every scheduled date.
#[derive(Debug, Clone, Default)]
pub struct PaymentIndex {
    entries: HashMap<(String, NaiveDate), bool>,
}

impl PaymentIndex {
    /// Build an index from a payment log
    pub fn new(payments: &[Payment]) -> Self {
        let mut entries = HashMap::with_capacity(payments.len());
        for payment in payments {
            entries
                .entry((payment.member_id.clone(), payment.day()))
                .or_insert(payment.paid);
        }
        Self { entries }
    }

    /// Whether a member paid on a given date
    pub fn is_paid(&self, member_id: &str, date: NaiveDate) -> bool {
        self.entries
            .get(&(member_id.to_string(), date))
            .copied()
            .unwrap_or(false)
    }

    /// Count the scheduled dates a member paid on
    pub fn paid_count(&self, member_id: &str, schedule: &[NaiveDate]) -> usize {
        schedule
            .iter()
            .filter(|date| self.is_paid(member_id, **date))
            .count()
    }

    /// Number of distinct (member, date) keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no payments
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
