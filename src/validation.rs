//! Input validation for insight
//!
//! Dataset ids and qualified field names share one rule: the underscore is
//! reserved as the separator between the dataset id and the field name.

use thiserror::Error;

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Dataset id '{0}' is empty or whitespace")]
    Blank(String),

    #[error("Dataset id '{0}' contains an underscore")]
    Underscore(String),
}

/// Validate a dataset id
///
/// Rules:
/// - Must contain something other than whitespace
/// - Cannot contain `_`
pub fn validate_dataset_id(id: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::Blank(id.to_string()));
    }

    if id.contains('_') {
        return Err(ValidationError::Underscore(id.to_string()));
    }

    Ok(())
}

/// Split a qualified field name `<dataset>_<field>` into its two parts
///
/// Returns None unless there is exactly one underscore with text on both sides.
pub fn split_qualified(name: &str) -> Option<(&str, &str)> {
    let (dataset, field) = name.split_once('_')?;
    if dataset.is_empty() || field.is_empty() || field.contains('_') {
        return None;
    }
    Some((dataset, field))
}
