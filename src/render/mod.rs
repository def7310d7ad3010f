//! Output renderers over a [`CommitteeReport`](crate::types::CommitteeReport)

pub mod document;
pub mod export;

pub use document::{DocumentRenderer, DOCUMENT_MIME_TYPE};
pub use export::{CsvExporter, CSV_MIME_TYPE, DETAIL_HEADER, NO_DATE};
