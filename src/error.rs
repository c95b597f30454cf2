//! Error types for schema lookups and validation

use thiserror::Error;

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Lookup and integrity errors.
///
/// These are distinct from a value failing its type rule: a rule mismatch is
/// an expected, advisory outcome and is reported as a message, never as a
/// `SchemaError`.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Variable not found: {name}")]
    NotFound { name: String },

    #[error("Index {index} out of range for schema with {len} variables")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No such data type: '{0}'")]
    UnknownDataType(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Locale scan error: {0}")]
    LocaleScan(#[from] walkdir::Error),
}
