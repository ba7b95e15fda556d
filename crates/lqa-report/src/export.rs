//! CSV export of assembled reports.

use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use polars::prelude::{CsvWriter, PolarsError, SerWriter};

use crate::error::ExportError;
use crate::table::{AssembledReport, ReportTable};

/// Where an export went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Report was empty; nothing was written.
    Skipped,
    /// Report was written to this file.
    Written(PathBuf),
}

/// Writes reports as `{layer}_QA_{YYYY-MM-DD}.csv` into one directory.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Report file name for a layer on a date.
    pub fn file_name(layer_name: &str, date: NaiveDate) -> String {
        format!(
            "{}_QA_{}.csv",
            sanitize_file_name(layer_name),
            date.format("%Y-%m-%d")
        )
    }

    /// Write the report, creating the output directory when needed.
    ///
    /// An empty report writes nothing and returns [`ExportOutcome::Skipped`].
    pub fn export(
        &self,
        report: &AssembledReport,
        layer_name: &str,
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(table) = report.table() else {
            tracing::info!("no issues found; no CSV created");
            return Ok(ExportOutcome::Skipped);
        };

        std::fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::CreateDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let path = self.output_dir.join(Self::file_name(layer_name, date));
        let mut file = File::create(&path).map_err(|source| ExportError::CreateFile {
            path: path.clone(),
            source,
        })?;
        write_csv(table, &mut file).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), rows = table.height(), "QA report exported");
        Ok(ExportOutcome::Written(path))
    }
}

/// Render a report table as CSV text with a header row.
pub fn to_csv_string(table: &ReportTable) -> Result<String, PolarsError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| PolarsError::ComputeError(err.to_string().into()))
}

fn write_csv<W: std::io::Write>(table: &ReportTable, writer: &mut W) -> Result<(), PolarsError> {
    let mut frame = table.frame().clone();
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut frame)
}

/// Replace characters that are not allowed in file names.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|ch| match ch {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    if cleaned.is_empty() {
        "layer".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            CsvExporter::file_name("Roads", date),
            "Roads_QA_2024-03-09.csv"
        );
        assert_eq!(
            CsvExporter::file_name("Roads/Streets: v2", date),
            "Roads_Streets_ v2_QA_2024-03-09.csv"
        );
        assert_eq!(CsvExporter::file_name("  ", date), "layer_QA_2024-03-09.csv");
    }
}
