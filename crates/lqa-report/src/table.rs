//! Tabular report assembly.

use lqa_model::Issue;
use lqa_validate::QaReport;
use polars::prelude::{Column, DataFrame};

use crate::error::Result;

/// Report column names, in output order.
pub const REPORT_COLUMNS: [&str; 5] = ["IssueType", "FieldName", "ObjectID", "Value", "Notes"];

/// A report ready for export.
#[derive(Debug, Clone)]
pub enum AssembledReport {
    /// The run found nothing; there is no table to write.
    NoIssues,
    Table(ReportTable),
}

impl AssembledReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoIssues)
    }

    pub fn table(&self) -> Option<&ReportTable> {
        match self {
            Self::NoIssues => None,
            Self::Table(table) => Some(table),
        }
    }
}

/// One row per issue, in report order.
///
/// All columns are strings. `Value` and `Notes` are null where the issue has
/// no value or note.
#[derive(Debug, Clone)]
pub struct ReportTable {
    frame: DataFrame,
}

impl ReportTable {
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }
}

/// Build the report table for a QA report.
pub fn assemble(report: &QaReport) -> Result<AssembledReport> {
    if report.is_empty() {
        tracing::debug!("no issues to assemble");
        return Ok(AssembledReport::NoIssues);
    }

    let issues = report.issues();
    let frame = DataFrame::new(vec![
        string_column(REPORT_COLUMNS[0], issues, |issue| {
            Some(issue.kind.label().to_string())
        }),
        string_column(REPORT_COLUMNS[1], issues, |issue| {
            Some(issue.field_name.clone())
        }),
        string_column(REPORT_COLUMNS[2], issues, |issue| {
            Some(issue.object_id.to_string())
        }),
        string_column(REPORT_COLUMNS[3], issues, |issue| {
            (!issue.value.is_null()).then(|| issue.value.to_string())
        }),
        string_column(REPORT_COLUMNS[4], issues, |issue| issue.notes.clone()),
    ])?;

    tracing::debug!(rows = frame.height(), "assembled report table");
    Ok(AssembledReport::Table(ReportTable { frame }))
}

fn string_column(
    name: &str,
    issues: &[Issue],
    cell: impl Fn(&Issue) -> Option<String>,
) -> Column {
    let values: Vec<Option<String>> = issues.iter().map(cell).collect();
    Column::new(name.into(), values)
}
