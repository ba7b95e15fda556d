//! Error types for validation runs and configuration loading.

use std::fmt;
use std::path::PathBuf;

use lqa_model::RecordId;
use thiserror::Error;

/// Which input feed an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Attributes,
    Geometry,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Attributes => f.write_str("attribute"),
            Feed::Geometry => f.write_str("geometry"),
        }
    }
}

/// Fatal errors that stop a validation run.
///
/// These all mean the feeds handed to the engine are inconsistent, so the run
/// refuses to validate partial data.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ValidationError {
    /// Geometry and attribute feeds disagree on the record count.
    #[error("geometry feed has {geometry} records but attribute feed has {attributes}")]
    FeedLengthMismatch { attributes: usize, geometry: usize },

    /// A record id occurs twice in one feed.
    #[error("record id {id} appears more than once in the {feed} feed")]
    DuplicateRecordId { feed: Feed, id: RecordId },

    /// A geometry record has no attribute record with the same id.
    #[error("geometry record {id} has no matching attribute record")]
    UnknownGeometryRecord { id: RecordId },
}

/// Result type for validation runs.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while loading a [`crate::ValidationConfig`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValidationError::DuplicateRecordId {
            feed: Feed::Geometry,
            id: RecordId::from(4),
        };
        assert_eq!(
            err.to_string(),
            "record id 4 appears more than once in the geometry feed"
        );
    }
}
