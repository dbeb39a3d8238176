//! Error types for boss data loading.

use thiserror::Error;

/// Errors that can occur when loading boss definitions.
#[derive(Debug, Error)]
pub enum BossDataError {
    /// Definitions directory is missing.
    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}
