//! Non-fatal diagnostics.
//!
//! Diagnostics describe problems with the configuration or the shape of the
//! input. They are surfaced next to the report and never become issues.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// The four rule evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    Null,
    Duplicate,
    Domain,
    Geometry,
}

impl RuleKind {
    /// All rules in execution order.
    pub const fn all() -> &'static [Self] {
        &[Self::Null, Self::Duplicate, Self::Domain, Self::Geometry]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Null => "null check",
            Self::Duplicate => "duplicate check",
            Self::Domain => "domain check",
            Self::Geometry => "geometry check",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A non-fatal finding about configuration or input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A configured field name is not in the catalog; the rule skipped it.
    UnknownField { rule: RuleKind, field: String },
    /// A coded domain descriptor was unusable; the field is treated as domain-less.
    MalformedDomain { field: String, reason: String },
    /// A value could not be read and was treated as null.
    UnreadableValue { object_id: RecordId, field: String },
    /// Records carry a field the catalog does not declare.
    UndeclaredAttribute { field: String },
}

impl Diagnostic {
    /// Field the diagnostic refers to.
    pub fn field(&self) -> &str {
        match self {
            Diagnostic::UnknownField { field, .. } => field,
            Diagnostic::MalformedDomain { field, .. } => field,
            Diagnostic::UnreadableValue { field, .. } => field,
            Diagnostic::UndeclaredAttribute { field } => field,
        }
    }

    /// Format message with diagnostic-specific data.
    pub fn message(&self) -> String {
        match self {
            Diagnostic::UnknownField { rule, field } => {
                format!("Field '{field}' is not in the layer; skipped for {rule}")
            }
            Diagnostic::MalformedDomain { field, reason } => {
                format!("Domain of field '{field}' is malformed ({reason}); domain check skipped")
            }
            Diagnostic::UnreadableValue { object_id, field } => {
                format!("Value of '{field}' for ObjectID {object_id} is unreadable; treated as null")
            }
            Diagnostic::UndeclaredAttribute { field } => {
                format!("Records carry undeclared field '{field}'; ignored")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
