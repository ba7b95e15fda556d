//! Error types for report assembly and export.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while building the report table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReportError {
    /// Failed DataFrame operation.
    #[error("failed to build report table: {0}")]
    Frame(#[from] PolarsError),
}

/// Errors raised while writing a report to disk.
///
/// An export failure never changes the validation result; callers report it
/// and keep the in-memory report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output file could not be created.
    #[error("failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("failed to write CSV {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Result type for report assembly.
pub type Result<T> = std::result::Result<T, ReportError>;
