//! Data model for feature layer quality checks.
//!
//! - **Values** (`value`): tagged attribute values with semantic equality
//! - **Fields** (`field`): field catalog with optional coded-value domains
//! - **Records** (`record`): attribute rows and geometry presence rows
//! - **Issues** (`issue`): QA findings produced by the rule evaluators
//! - **Diagnostics** (`diagnostic`): non-fatal findings about input shape

pub mod diagnostic;
pub mod error;
pub mod field;
pub mod issue;
pub mod record;
pub mod value;

pub use diagnostic::{Diagnostic, RuleKind};
pub use error::{ModelError, Result};
pub use field::{CodedDomain, Field, FieldCatalog, FieldType};
pub use issue::{GEOMETRY_FIELD, Issue, IssueKind};
pub use record::{GeometryRecord, Record, RecordId};
pub use value::{TextMatching, Value, ValueKey};
