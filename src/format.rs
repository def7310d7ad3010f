//! Formatting and rounding helpers shared by the aggregator and renderers

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};

/// Whole-number percentage of `part` in `whole`, rounded down.
///
/// Yields 0 when `whole` is zero.
pub fn floor_percentage(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    let percentage = part.min(whole) * 100 / whole;
    u32::try_from(percentage).unwrap_or(100)
}

/// Collection rate as text with one decimal, rounded half-up.
///
/// Returns `"0"` when nothing was expected.
pub fn collection_rate(paid: u64, expected: u64) -> String {
    if expected == 0 {
        return "0".to_string();
    }
    let paid = u128::from(paid);
    let expected = u128::from(expected);
    let tenths = (paid * 2000 + expected) / (expected * 2);
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Display an amount without a currency symbol or grouping.
///
/// Whole amounts lose their fractional zeros (`5000.00` shows as `5000`);
/// other amounts keep their stored scale.
pub fn format_amount(amount: &BigDecimal) -> String {
    if amount.is_integer() {
        amount.with_scale(0).to_string()
    } else {
        amount.to_string()
    }
}

/// Date as shown in both outputs
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Generation timestamp as shown in both outputs
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format("%d %b %Y %H:%M").to_string()
}

/// Capitalised frequency label, e.g. `Monthly`
pub fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// File name stem derived from a committee name.
///
/// Characters outside `[A-Za-z0-9-]` become underscores; an empty result
/// falls back to `Committee`.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if stem.trim_matches('_').is_empty() {
        "Committee".to_string()
    } else {
        stem
    }
}
