//! Error types for IQL parsing

use thiserror::Error;

/// Error raised while turning a JSON value into a [`crate::Query`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The object structure does not match the query grammar
    #[error("Malformed query: {0}")]
    Shape(String),

    /// A literal has the wrong type for its operator
    #[error("Type mismatch: {0}")]
    Type(String),

    /// An IS operand uses `*` somewhere other than the first or last position
    #[error("Invalid wildcard pattern '{0}': '*' may only appear at the start or end")]
    Pattern(String),
}

impl ParseError {
    pub fn shape(message: impl Into<String>) -> Self {
        ParseError::Shape(message.into())
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        ParseError::Type(message.into())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        ParseError::Shape(format!("Invalid JSON: {}", err))
    }
}
