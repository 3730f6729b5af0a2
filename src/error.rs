//! Error types for the Payroll Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the collaborators around the calculator: configuration loading,
//! salary record normalization and profile validation. The calculator
//! itself is total and never returns an error.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Payroll Engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No salary structure with the given code is effective on the date.
    #[error("Salary structure '{code}' not found for date {date}")]
    StructureNotFound {
        /// The structure code.
        code: String,
        /// The date for which the structure was requested.
        date: NaiveDate,
    },

    /// A fetched salary record could not be mapped into a profile.
    #[error("Invalid salary record: {message}")]
    InvalidSalaryRecord {
        /// A description of what made the record unusable.
        message: String,
    },

    /// A salary profile failed validation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
