//! Feature layer QA report output.
//!
//! - **Assembly** (`table`): turns a [`lqa_validate::QaReport`] into a
//!   tabular report (one row per issue)
//! - **Export** (`export`): writes the table as `{layer}_QA_{date}.csv`
//!
//! Assembly never touches the file system, and an empty report is never
//! written.

mod error;
mod export;
mod table;

pub use error::{ExportError, ReportError, Result};
pub use export::{CsvExporter, ExportOutcome, to_csv_string};
pub use table::{AssembledReport, REPORT_COLUMNS, ReportTable, assemble};
