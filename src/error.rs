//! Error types for the msgload pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`InputError`] - source file reading and CSV parsing errors
//! - [`TransformError`] - label expansion and cleaning errors
//! - [`StorageError`] - SQLite write errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors while reading a source file into a table.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode file content.
    #[error("Failed to decode content as {encoding}: {message}")]
    EncodingError { encoding: String, message: String },

    /// Invalid CSV structure (inconsistent field counts, bad quoting).
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Empty file.
    #[error("File is empty: {0}")]
    EmptyFile(String),

    /// A required column is missing from the header row.
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { column: String, file: String },
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// Errors while expanding the packed label column or cleaning rows.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Packed token has no `name-value` separator.
    #[error("Row {row}: label token '{token}' has no '-' separator")]
    BadToken { row: usize, token: String },

    /// Label value is not a base-10 integer.
    #[error("Row {row}, label '{column}': value '{value}' is not numeric")]
    NonNumericLabel {
        row: usize,
        column: String,
        value: String,
    },

    /// A row's label names disagree with the schema derived from row 0.
    #[error("Row {row}: label names disagree with row 0 (expected '{expected}', found '{found}')")]
    SchemaMismatch {
        row: usize,
        expected: String,
        found: String,
    },

    /// A column required by the transformation is absent.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors while writing the cleaned table to SQLite.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying SQLite failure (unwritable path, rejected write).
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The table to write has no columns.
    #[error("Refusing to write a table with no columns")]
    NoColumns,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::run`].
/// It wraps all lower-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Transformation error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for transformation operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // InputError -> PipelineError
        let input_err = InputError::MissingColumn {
            column: "id".into(),
            file: "messages.csv".into(),
        };
        let pipeline_err: PipelineError = input_err.into();
        assert!(pipeline_err.to_string().contains("id"));

        // TransformError -> PipelineError
        let transform_err = TransformError::MissingColumn("related".into());
        let pipeline_err: PipelineError = transform_err.into();
        assert!(pipeline_err.to_string().contains("related"));
    }

    #[test]
    fn test_non_numeric_label_format() {
        let err = TransformError::NonNumericLabel {
            row: 4,
            column: "request".into(),
            value: "x".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 4"));
        assert!(msg.contains("request"));
        assert!(msg.contains("'x'"));
    }
}
