//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Which piece of user input failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Date is not a real calendar date in `YYYY-MM-DD` form
    InvalidDate,
    /// Amount is not a non-negative decimal number
    InvalidAmount,
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDate => write!(f, "invalid date"),
            Self::InvalidAmount => write!(f, "invalid amount"),
        }
    }
}

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// User input was rejected; the ledger was not touched
    #[error("Validation error ({kind}): {message}")]
    Validation {
        kind: ValidationKind,
        message: String,
    },

    /// The ledger file exists but does not hold a well-formed list of expenses
    #[error("Ledger file {path} is corrupt: {reason}")]
    StorageCorrupt { path: String, reason: String },

    /// Persisting the ledger failed; the in-memory ledger was not updated
    #[error("Failed to write ledger file {path}: {reason}")]
    StorageWrite { path: String, reason: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),
}

impl TrackerError {
    /// Create an `InvalidDate` validation error
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::Validation {
            kind: ValidationKind::InvalidDate,
            message: message.into(),
        }
    }

    /// Create an `InvalidAmount` validation error
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::Validation {
            kind: ValidationKind::InvalidAmount,
            message: message.into(),
        }
    }

    pub fn storage_corrupt(path: &Path, reason: impl fmt::Display) -> Self {
        Self::StorageCorrupt {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn storage_write(path: &Path, reason: impl fmt::Display) -> Self {
        Self::StorageWrite {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The validation kind, if this is a validation error
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Errors the interactive menu reports and then keeps running after
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::StorageCorrupt { .. } | Self::Config(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
