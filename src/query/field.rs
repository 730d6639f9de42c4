//! Qualified field resolution

use crate::error::{Error, Result};
use crate::storage::dataset::Dataset;
use crate::validation::split_qualified;

/// Resolve `<dataset>_<field>` to the local field name inside `dataset`
///
/// Names that are not qualified, or that name another dataset, are
/// cross-dataset references. Qualified names missing from the schema are
/// unknown fields.
pub fn resolve<'a>(name: &'a str, dataset: &Dataset) -> Result<&'a str> {
    let (prefix, field) = match split_qualified(name) {
        Some(parts) if parts.0 == dataset.id() => parts,
        _ => {
            return Err(Error::CrossDataset {
                field: name.to_string(),
                dataset: dataset.id().to_string(),
            })
        }
    };

    if !dataset.has_field(field) {
        return Err(Error::UnknownField {
            field: name.to_string(),
            dataset: prefix.to_string(),
        });
    }

    Ok(field)
}
