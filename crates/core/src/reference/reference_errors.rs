//! Reference data import error types.

use thiserror::Error;

/// Errors raised while loading reference tables from CSV files.
#[derive(Error, Debug)]
pub enum ReferenceImportError {
    /// The file could not be opened or read.
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    /// The CSV itself is malformed.
    #[error("Malformed CSV in '{path}': {message}")]
    Csv { path: String, message: String },

    /// A required column header is absent.
    #[error("Column '{column}' not found in '{path}'")]
    MissingColumn { path: String, column: String },

    /// A numeric cell could not be parsed.
    #[error("Invalid value '{value}' in column '{column}' of '{path}'")]
    InvalidValue {
        path: String,
        column: String,
        value: String,
    },
}
