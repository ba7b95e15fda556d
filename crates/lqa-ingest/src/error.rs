//! Error types for feature layer ingestion.

use std::path::PathBuf;

use lqa_model::ModelError;
use thiserror::Error;

/// Errors that can occur while loading a layer definition or feature set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document loaded from disk was rejected.
    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<IngestError>,
    },

    // === Parsing Errors ===
    /// Document is not valid JSON or does not have the expected shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// A feature does not carry the object id field.
    #[error("feature {index} has no '{field}' value")]
    MissingObjectId { index: usize, field: String },

    /// The object id is neither an integer nor a string.
    #[error("feature {index} has an unusable '{field}' value: {value}")]
    InvalidObjectId {
        index: usize,
        field: String,
        value: String,
    },

    // === Model Errors ===
    /// The parsed layer violates a model invariant.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IngestError {
    /// Attach the file the error came from.
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
