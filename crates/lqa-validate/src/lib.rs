//! Feature layer validation and QA checks.
//!
//! This crate runs the QA rules over an attribute feed and an optional
//! geometry feed:
//!
//! - **Null values**: checked fields carrying a null value
//! - **Duplicate values**: repeated non-null values in non-exempt fields
//! - **Domain values**: values outside a field's coded-value domain
//! - **Missing geometry**: geometry feed records without a shape
//!
//! Rules always run in that order so the report is reproducible.
//!
//! # Example
//!
//! ```ignore
//! use lqa_validate::{ValidationConfig, ValidationEngine, ValidationInput};
//!
//! let config = ValidationConfig::default().with_duplicate_exemptions(["City", "State"]);
//! let engine = ValidationEngine::new(config);
//!
//! let input = ValidationInput::new(&catalog, &records).with_geometry(&shapes);
//! let outcome = engine.run(&input)?;
//!
//! for issue in outcome.report.issues() {
//!     println!("{} {} {}", issue.kind, issue.field_name, issue.object_id);
//! }
//! ```

mod checks;
mod config;
mod engine;
mod error;
mod report;
mod sink;
mod util;

pub use config::{FieldSelection, ValidationConfig};
pub use engine::{ValidationEngine, ValidationInput, ValidationOutcome};
pub use error::{ConfigError, Feed, Result, ValidationError};
pub use report::QaReport;
pub use sink::IssueSink;
pub use util::FieldLookup;

use lqa_model::{FieldCatalog, GeometryRecord, Record};

/// Validate a dataset with the given configuration.
///
/// Shorthand for building a [`ValidationEngine`] and running it once.
pub fn validate(
    catalog: &FieldCatalog,
    records: &[Record],
    geometry: Option<&[GeometryRecord]>,
    config: ValidationConfig,
) -> Result<ValidationOutcome> {
    let mut input = ValidationInput::new(catalog, records);
    if let Some(geometry) = geometry {
        input = input.with_geometry(geometry);
    }
    ValidationEngine::new(config).run(&input)
}
