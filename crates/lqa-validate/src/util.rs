//! Utility types for validation.

use std::collections::{HashMap, HashSet};

/// Resolves configured field names against catalog names.
///
/// Exact matches win; otherwise the lookup is case-insensitive and returns
/// the catalog's own spelling. When two catalog names differ only by case the
/// first one registered is returned for case-insensitive lookups.
#[derive(Debug, Clone, Default)]
pub struct FieldLookup {
    exact: HashSet<String>,
    /// Maps uppercase name -> original name
    folded: HashMap<String, String>,
}

impl FieldLookup {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lookup from an iterator of names.
    pub fn from_iter<I, S>(iter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lookup = Self::new();
        for name in iter {
            lookup.insert(name);
        }
        lookup
    }

    /// Register a name.
    pub fn insert(&mut self, name: impl AsRef<str>) {
        let name = name.as_ref();
        self.exact.insert(name.to_string());
        self.folded
            .entry(name.to_uppercase())
            .or_insert_with(|| name.to_string());
    }

    /// Check if a name resolves (case-insensitive).
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.resolve(name).is_some()
    }

    /// Get the registered spelling of a name.
    pub fn resolve(&self, name: impl AsRef<str>) -> Option<&str> {
        let name = name.as_ref();
        if let Some(exact) = self.exact.get(name) {
            return Some(exact.as_str());
        }
        self.folded.get(&name.to_uppercase()).map(String::as_str)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    /// Check if lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}
