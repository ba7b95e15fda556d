//! Validation configuration.
//!
//! The configuration is passed to the engine at construction. It can be
//! built in code or loaded from a TOML file:
//!
//! ```toml
//! checked_fields = ["Name", "Status"]
//! duplicate_exemptions = ["City", "State", "Zip_Code"]
//! duplicate_text_matching = "case-insensitive"
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use lqa_model::TextMatching;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which fields the null and duplicate checks scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldSelection {
    /// Every field in the catalog.
    #[default]
    All,
    /// Only the named fields.
    Only(BTreeSet<String>),
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fields scanned by the null and duplicate checks.
    pub checked_fields: FieldSelection,
    /// Fields never checked for duplicates (values expected to repeat).
    pub duplicate_exemptions: BTreeSet<String>,
    /// Text comparison used when grouping duplicates.
    pub duplicate_text_matching: TextMatching,
}

impl ValidationConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Restrict the null and duplicate checks to the given fields.
    #[must_use]
    pub fn with_checked_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.checked_fields = FieldSelection::Only(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Add fields to the duplicate exemption list.
    #[must_use]
    pub fn with_duplicate_exemptions<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.duplicate_exemptions
            .extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_duplicate_text_matching(mut self, matching: TextMatching) -> Self {
        self.duplicate_text_matching = matching;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ValidationConfig::from_toml_str("").unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.checked_fields, FieldSelection::All);
    }

    #[test]
    fn test_parse_full_toml() {
        let config = ValidationConfig::from_toml_str(
            r#"
            checked_fields = ["Name", "Status"]
            duplicate_exemptions = ["City", "State"]
            duplicate_text_matching = "case-insensitive"
            "#,
        )
        .unwrap();

        let expected = ValidationConfig::default()
            .with_checked_fields(["Name", "Status"])
            .with_duplicate_exemptions(["City", "State"])
            .with_duplicate_text_matching(TextMatching::CaseInsensitive);
        assert_eq!(config, expected);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ValidationConfig::from_toml_str("exempt = [\"City\"]").is_err());
    }
}
