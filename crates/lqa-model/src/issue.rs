//! QA issue types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::diagnostic::RuleKind;
use crate::field::CodedDomain;
use crate::record::RecordId;
use crate::value::Value;

/// Field name reported for geometry issues.
pub const GEOMETRY_FIELD: &str = "SHAPE";

/// Kind of QA finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueKind {
    NullValue,
    DuplicateValue,
    InvalidDomainValue,
    MissingGeometry,
}

impl IssueKind {
    /// All kinds in report order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::NullValue,
            Self::DuplicateValue,
            Self::InvalidDomainValue,
            Self::MissingGeometry,
        ]
    }

    /// Label written to the `IssueType` column.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NullValue => "NULL Value",
            Self::DuplicateValue => "Duplicate Value",
            Self::InvalidDomainValue => "Invalid Domain Value",
            Self::MissingGeometry => "Missing Geometry",
        }
    }

    /// Parse a report label back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "null value" => Some(Self::NullValue),
            "duplicate value" => Some(Self::DuplicateValue),
            "invalid domain value" => Some(Self::InvalidDomainValue),
            "missing geometry" => Some(Self::MissingGeometry),
            _ => None,
        }
    }

    /// Rule that produces this kind.
    pub fn rule(&self) -> RuleKind {
        match self {
            Self::NullValue => RuleKind::Null,
            Self::DuplicateValue => RuleKind::Duplicate,
            Self::InvalidDomainValue => RuleKind::Domain,
            Self::MissingGeometry => RuleKind::Geometry,
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One QA finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub field_name: String,
    pub object_id: RecordId,
    /// Offending value, `Null` when absent.
    pub value: Value,
    pub notes: Option<String>,
}

impl Issue {
    pub fn null_value(field: &str, object_id: &RecordId) -> Self {
        Self {
            kind: IssueKind::NullValue,
            field_name: field.to_string(),
            object_id: object_id.clone(),
            value: Value::Null,
            notes: None,
        }
    }

    pub fn duplicate_value(field: &str, object_id: &RecordId, value: &Value) -> Self {
        Self {
            kind: IssueKind::DuplicateValue,
            field_name: field.to_string(),
            object_id: object_id.clone(),
            value: value.clone(),
            notes: Some(format!("Duplicate of value '{value}'")),
        }
    }

    pub fn invalid_domain_value(
        field: &str,
        object_id: &RecordId,
        value: &Value,
        domain: &CodedDomain,
    ) -> Self {
        Self {
            kind: IssueKind::InvalidDomainValue,
            field_name: field.to_string(),
            object_id: object_id.clone(),
            value: value.clone(),
            notes: Some(format!(
                "Not in valid domain list: {}",
                domain.describe_codes()
            )),
        }
    }

    pub fn missing_geometry(object_id: &RecordId) -> Self {
        Self {
            kind: IssueKind::MissingGeometry,
            field_name: GEOMETRY_FIELD.to_string(),
            object_id: object_id.clone(),
            value: Value::Null,
            notes: Some("Null geometry".to_string()),
        }
    }
}
