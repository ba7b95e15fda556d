//! Field catalog and coded-value domains.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::error::{ModelError, Result};
use crate::value::{Value, ValueKey};

/// Semantic field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    #[default]
    Text,
    Integer,
    Float,
    Date,
}

impl FieldType {
    /// Parse a feature service field type name (e.g. `esriFieldTypeDouble`).
    ///
    /// Short names (`string`, `integer`, `double`, `date`) are accepted as well.
    /// Returns `None` for types that carry no attribute value we can check.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        let name = normalized
            .strip_prefix("esrifieldtype")
            .unwrap_or(&normalized);
        match name {
            // Time-of-day values have no calendar date; they are kept as text.
            "string" | "text" | "guid" | "globalid" | "timeonly" => Some(Self::Text),
            "oid" | "integer" | "smallinteger" | "biginteger" => Some(Self::Integer),
            "double" | "single" | "float" => Some(Self::Float),
            "date" | "dateonly" | "timestampoffset" => Some(Self::Date),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Date => "Date",
        }
    }
}

/// A closed set of valid codes for a field.
///
/// Always non-empty, without nulls, and without repeated codes.
#[derive(Debug, Clone, Serialize)]
pub struct CodedDomain {
    name: Option<String>,
    codes: Vec<Value>,
    #[serde(skip)]
    keys: HashSet<ValueKey>,
}

impl CodedDomain {
    /// Create an unnamed domain from its codes.
    pub fn new(codes: Vec<Value>) -> Result<Self> {
        Self::build(None, codes)
    }

    /// Create a named domain from its codes.
    pub fn named(name: impl Into<String>, codes: Vec<Value>) -> Result<Self> {
        Self::build(Some(name.into()), codes)
    }

    fn build(name: Option<String>, codes: Vec<Value>) -> Result<Self> {
        let label = name.clone().unwrap_or_else(|| "<unnamed>".to_string());
        if codes.is_empty() {
            return Err(ModelError::EmptyDomain { domain: label });
        }

        let mut keys = HashSet::with_capacity(codes.len());
        for code in &codes {
            let Some(key) = code.key() else {
                return Err(ModelError::NullDomainCode { domain: label });
            };
            if !keys.insert(key) {
                return Err(ModelError::DuplicateDomainCode {
                    domain: label,
                    code: code.to_string(),
                });
            }
        }

        Ok(Self { name, codes, keys })
    }

    /// Domain name, when the source declared one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Valid codes in declaration order.
    pub fn codes(&self) -> &[Value] {
        &self.codes
    }

    /// Whether a non-null value is one of the valid codes.
    pub fn contains(&self, value: &Value) -> bool {
        value.key().is_some_and(|key| self.keys.contains(&key))
    }

    /// Code list rendered as `['A', 'B']`.
    pub fn describe_codes(&self) -> String {
        let codes: Vec<String> = self.codes.iter().map(Value::quoted).collect();
        format!("[{}]", codes.join(", "))
    }
}

/// One attribute field.
#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,
    pub alias: Option<String>,
    pub field_type: FieldType,
    pub domain: Option<CodedDomain>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            alias: None,
            field_type,
            domain: None,
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: CodedDomain) -> Self {
        self.domain = Some(domain);
        self
    }
}

/// Ordered list of fields with unique names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    /// Build a catalog, rejecting repeated field names.
    pub fn new(fields: Vec<Field>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Look up a field by its exact name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    /// Fields carrying a coded domain, in catalog order.
    pub fn domain_fields(&self) -> impl Iterator<Item = (&Field, &CodedDomain)> {
        self.fields
            .iter()
            .filter_map(|field| field.domain.as_ref().map(|domain| (field, domain)))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_type() {
        assert_eq!(FieldType::parse("esriFieldTypeString"), Some(FieldType::Text));
        assert_eq!(FieldType::parse("esriFieldTypeOID"), Some(FieldType::Integer));
        assert_eq!(FieldType::parse("esriFieldTypeDouble"), Some(FieldType::Float));
        assert_eq!(FieldType::parse("esriFieldTypeDate"), Some(FieldType::Date));
        assert_eq!(FieldType::parse("date"), Some(FieldType::Date));
        assert_eq!(FieldType::parse("esriFieldTypeTimeOnly"), Some(FieldType::Text));
        assert_eq!(FieldType::parse("esriFieldTypeBlob"), None);
    }

    #[test]
    fn test_domain_rejects_empty() {
        let err = CodedDomain::named("Status", vec![]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyDomain { .. }));
    }

    #[test]
    fn test_domain_rejects_repeated_code() {
        let err = CodedDomain::new(vec![Value::Integer(1), Value::Float(1.0)]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateDomainCode { .. }));
    }

    #[test]
    fn test_domain_membership_is_semantic() {
        let domain = CodedDomain::new(vec![Value::Integer(1), Value::Integer(2)]).unwrap();
        assert!(domain.contains(&Value::Float(2.0)));
        assert!(!domain.contains(&Value::from("2")));
        assert!(!domain.contains(&Value::Null));
    }

    #[test]
    fn test_describe_codes() {
        let domain = CodedDomain::new(vec![Value::from("A"), Value::from("B")]).unwrap();
        assert_eq!(domain.describe_codes(), "['A', 'B']");
    }
}
