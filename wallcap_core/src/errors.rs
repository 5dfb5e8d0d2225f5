//! # Error Types
//!
//! Structured error types for wallcap_core. Every error carries enough
//! context (the offending field, or the sweep stage and strain-state index)
//! for a caller to fix the input without re-running the engine in a debugger.
//!
//! ## Example
//!
//! ```rust
//! use wallcap_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::validation(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wallcap_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for capacity calculations.
///
/// All operations are deterministic, so none of these errors is worth
/// retrying without changing the input.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Malformed geometry, material, reinforcement or configuration input
    #[error("Invalid input for '{field}': {value} - {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    /// Numerical failure inside the fiber sweep or a capacity formula
    #[error("Computation failed in {stage}{}: {reason}", state_suffix(.index))]
    Computation {
        stage: String,
        index: Option<usize>,
        reason: String,
    },

    /// Input file could not be parsed
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Input file could not be read
    #[error("File {operation} failed for '{path}': {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },
}

impl CalcError {
    /// Create a Validation error
    pub fn validation(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a Computation error that is not tied to one strain state
    pub fn computation(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Computation {
            stage: stage.into(),
            index: None,
            reason: reason.into(),
        }
    }

    /// Create a Computation error for a specific strain state of the sweep
    pub fn computation_at(stage: impl Into<String>, index: usize, reason: impl Into<String>) -> Self {
        CalcError::Computation {
            stage: stage.into(),
            index: Some(index),
            reason: reason.into(),
        }
    }

    /// Create a Serialization error
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::Serialization {
            reason: reason.into(),
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

    /// True when the caller has to change the input (as opposed to the
    /// discretization or sweep configuration)
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::Validation { .. } | CalcError::Serialization { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_ERROR",
            CalcError::Computation { .. } => "COMPUTATION_ERROR",
            CalcError::Serialization { .. } => "SERIALIZATION_ERROR",
            CalcError::FileError { .. } => "FILE_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

fn state_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" (strain state {i})")).unwrap_or_default()
}

/// Reject NaN and infinities for a named input field.
pub(crate) fn require_finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::validation(field, value.to_string(), "Value must be finite"));
    }
    Ok(())
}

/// Reject non-positive (or non-finite) values for a named input field.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    require_finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::validation(field, value.to_string(), "Value must be positive"));
    }
    Ok(())
}
