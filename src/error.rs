//! Error types for insight
//!
//! Every failure the engine can report is a variant here. Validation is
//! fail-fast: the first rule that is violated becomes the error.

use thiserror::Error;

/// The main error type for insight operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Dataset Errors
    // ==========================================================================
    #[error("Invalid dataset id '{id}': {reason}")]
    InvalidId { id: String, reason: &'static str },

    #[error("Dataset '{id}' already exists")]
    Duplicate { id: String },

    #[error("Dataset '{id}' does not exist")]
    NotFound { id: String },

    #[error("Failed to ingest dataset '{id}': {source}")]
    Ingest {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    // ==========================================================================
    // Query Errors
    // ==========================================================================
    #[error("Malformed query: {message}")]
    Shape { message: String },

    #[error("Field '{field}' does not belong to dataset '{dataset}'")]
    CrossDataset { field: String, dataset: String },

    #[error("Field '{field}' does not exist in dataset '{dataset}'")]
    UnknownField { field: String, dataset: String },

    #[error("Type mismatch: {message}")]
    Type { message: String },

    #[error("Invalid wildcard pattern '{pattern}'")]
    Pattern { pattern: String },

    #[error("Wildcard pattern '{pattern}' is too large to match")]
    PatternTooLarge { pattern: String },

    #[error("Query returned {count} rows, more than the limit of {limit}")]
    ResultTooLarge { count: usize, limit: usize },
}

/// Result type alias for insight operations
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse grouping a transport layer can map to status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The referenced dataset is not loaded
    NotFound,
    /// The request itself is malformed or refers to bad fields
    Invalid,
    /// The request was valid but the answer is too big
    ResultTooLarge,
}

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<iql::ParseError> for Error {
    fn from(err: iql::ParseError) -> Self {
        match err {
            iql::ParseError::Shape(message) => Error::Shape { message },
            iql::ParseError::Type(message) => Error::Type { message },
            iql::ParseError::Pattern(pattern) => Error::Pattern { pattern },
        }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        match err {
            crate::validation::ValidationError::Blank(id) => Error::InvalidId {
                id,
                reason: "cannot be empty or whitespace",
            },
            crate::validation::ValidationError::Underscore(id) => Error::InvalidId {
                id,
                reason: "cannot contain an underscore",
            },
        }
    }
}

// =============================================================================
// Error Display Helpers
// =============================================================================

impl Error {
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::NotFound { .. } => ErrorClass::NotFound,
            Error::ResultTooLarge { .. } => ErrorClass::ResultTooLarge,
            _ => ErrorClass::Invalid,
        }
    }

    /// Returns true if the same request could succeed once narrowed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ResultTooLarge { .. })
    }

    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::InvalidId { .. } => Some("Use a non-blank id without underscores"),
            Error::Duplicate { .. } => Some("Remove the existing dataset before adding it again"),
            Error::NotFound { .. } => Some("List loaded datasets with: insight list"),
            Error::CrossDataset { .. } => {
                Some("Every field in a query must use the same <dataset>_ prefix")
            }
            Error::Pattern { .. } => Some("'*' is only allowed as the first or last character"),
            Error::PatternTooLarge { .. } => Some("Use a shorter IS operand"),
            Error::ResultTooLarge { .. } => Some("Add a WHERE condition to narrow the result"),
            _ => None,
        }
    }
}
