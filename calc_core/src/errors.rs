//! # Error Types
//!
//! Structured error types for calc_core.
//!
//! User input problems are *not* errors here: they are reported by the
//! per-calculator `validate` functions as a [`Validation`](crate::validation::Validation)
//! list of messages. `CalcError` covers the remaining tier: contract violations
//! (a reference key that should have been validated does not resolve) and
//! worksheet file I/O.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn stud_area(key: &str) -> CalcResult<f64> {
//!     calc_core::materials::stud_spec(key)
//!         .map(|s| s.tensile_area_in2)
//!         .ok_or_else(|| CalcError::unknown_reference("stud", key))
//! }
//!
//! assert!(stud_area("1-1/2-8UN").is_ok());
//! assert_eq!(stud_area("M99").unwrap_err().error_code(), "UNKNOWN_REFERENCE");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation and file operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A reference-table key did not resolve at calculation time
    #[error("{table} spec not found: {key}")]
    UnknownReference { table: String, key: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownReference error
    pub fn unknown_reference(table: impl Into<String>, key: impl Into<String>) -> Self {
        CalcError::UnknownReference {
            table: table.into(),
            key: key.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError { reason: reason.into() }
    }

    /// True for errors caused by a caller skipping validation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, CalcError::InvalidInput { .. } | CalcError::UnknownReference { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownReference { .. } => "UNKNOWN_REFERENCE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
