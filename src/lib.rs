//! # Committee Report
//!
//! Contribution reconciliation and report rendering for rotating savings
//! committees.
//!
//! ## Features
//!
//! - **Schedule generation**: expected contribution dates for daily, weekly and monthly committees
//! - **Payment matching**: date-only matching of a payment log against the schedule
//! - **Aggregation**: per-member percentages and committee totals from a single code path
//! - **Rendering**: a print-ready A4 document and a flat CSV export over the same figures
//! - **Storage abstraction**: trait-based data access and delivery collaborators
//!
//! ## Quick Start
//!
//! ```rust
//! use committee_report::{aggregate, generate_schedule, Committee, Frequency};
//! use bigdecimal::BigDecimal;
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let committee = Committee::new(
//!     "c1".to_string(),
//!     "Family Fund".to_string(),
//!     "FF".to_string(),
//!     BigDecimal::from(5000),
//!     Frequency::Monthly,
//!     start.and_hms_opt(0, 0, 0).unwrap(),
//! );
//! let schedule = generate_schedule(&committee, None, NaiveDate::from_ymd_opt(2024, 4, 1));
//! assert_eq!(schedule.len(), 4);
//!
//! let (records, totals) = aggregate(&committee, &[], &[], &schedule);
//! assert!(records.is_empty());
//! assert_eq!(totals.collection_rate, "0");
//! ```

pub mod aggregate;
pub mod config;
pub mod engine;
pub mod format;
pub mod matching;
pub mod render;
pub mod schedule;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use aggregate::aggregate;
pub use config::ReportOptions;
pub use engine::*;
pub use matching::{find_payment, is_paid, PaymentIndex};
pub use render::{CsvExporter, DocumentRenderer};
pub use schedule::generate_schedule;
pub use traits::*;
pub use types::*;
