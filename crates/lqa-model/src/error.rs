//! Error types for model construction.

use thiserror::Error;

/// Errors raised when a model invariant would be violated.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ModelError {
    /// A coded domain was declared without any codes.
    #[error("coded domain {domain} has no codes")]
    EmptyDomain { domain: String },

    /// A coded domain lists the same code more than once.
    #[error("coded domain {domain} repeats code '{code}'")]
    DuplicateDomainCode { domain: String, code: String },

    /// A coded domain contains a null code.
    #[error("coded domain {domain} contains a null code")]
    NullDomainCode { domain: String },

    /// Two fields in one catalog share a name.
    #[error("field '{name}' is declared more than once")]
    DuplicateField { name: String },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
