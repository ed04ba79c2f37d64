//! Error types for the statement generator
//!
//! This module defines every error that can occur while turning a request
//! record into a generated document.
//!
//! # Error Categories
//!
//! - **Input Errors**: malformed records, periods, or amounts
//! - **Generation Errors**: date sampling and amount constraints
//! - **Output Errors**: template rendering and file I/O
//!
//! None of these is fatal to a batch: the batch processor records the error
//! against the offending record and moves on to the next one.

use thiserror::Error;

/// Main error type for statement generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    /// The statement period is malformed or its end precedes its start
    #[error("Invalid statement period '{period}': {reason}")]
    InvalidPeriod {
        /// The period as supplied (or rendered from its dates)
        period: String,
        /// Why it was rejected
        reason: String,
    },

    /// A date sample of fewer than one date was requested
    #[error("Invalid date count {requested}: at least one date is required")]
    InvalidDateCount {
        /// The requested number of dates
        requested: usize,
    },

    /// The period has fewer distinct days than the sample needs
    ///
    /// This is recovered by padding inside the date sampler and never
    /// reaches the caller; it exists so the recovery can be reported.
    #[error("Insufficient date range: {available} distinct days for {requested} dates")]
    InsufficientDateRange {
        /// Distinct days the period can supply
        available: usize,
        /// Distinct days the sample wanted
        requested: usize,
    },

    /// An archetype's amount constraint cannot be met
    #[error("Amount constraint unsatisfiable for '{label}' after {attempts} draws")]
    AmountConstraintUnsatisfiable {
        /// Archetype label
        label: String,
        /// Number of draws attempted
        attempts: u32,
    },

    /// A monetary input could not be represented in cents
    #[error("Invalid amount '{value}'")]
    InvalidAmount {
        /// The offending value
        value: String,
    },

    /// A request record is missing fields or has the wrong types
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of the problem
        message: String,
    },

    /// The template renderer failed
    #[error("Template render failure: {message}")]
    TemplateRenderFailure {
        /// Description of the failure
        message: String,
    },

    /// I/O error while reading input or writing output
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },
}

impl From<std::io::Error> for StatementError {
    fn from(error: std::io::Error) -> Self {
        StatementError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for StatementError {
    fn from(error: serde_json::Error) -> Self {
        StatementError::InvalidRecord {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for StatementError {
    fn from(error: csv::Error) -> Self {
        StatementError::TemplateRenderFailure {
            message: error.to_string(),
        }
    }
}

impl StatementError {
    /// Short tag used in the batch envelope's failure entries
    pub fn kind(&self) -> &'static str {
        match self {
            StatementError::InvalidPeriod { .. } => "InvalidPeriod",
            StatementError::InvalidDateCount { .. } => "InvalidDateCount",
            StatementError::InsufficientDateRange { .. } => "InsufficientDateRange",
            StatementError::AmountConstraintUnsatisfiable { .. } => {
                "AmountConstraintUnsatisfiable"
            }
            StatementError::InvalidAmount { .. } => "InvalidAmount",
            StatementError::InvalidRecord { .. } => "InvalidRecord",
            StatementError::TemplateRenderFailure { .. } => "TemplateRenderFailure",
            StatementError::IoError { .. } => "IoError",
        }
    }

    /// Create an InvalidPeriod error
    pub fn invalid_period(period: impl Into<String>, reason: &str) -> Self {
        StatementError::InvalidPeriod {
            period: period.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an AmountConstraintUnsatisfiable error
    pub fn amount_constraint_unsatisfiable(label: &str, attempts: u32) -> Self {
        StatementError::AmountConstraintUnsatisfiable {
            label: label.to_string(),
            attempts,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(value: impl ToString) -> Self {
        StatementError::InvalidAmount {
            value: value.to_string(),
        }
    }

    /// Create a TemplateRenderFailure error
    pub fn render_failure(message: impl Into<String>) -> Self {
        StatementError::TemplateRenderFailure {
            message: message.into(),
        }
    }
}
