//! Column projection

use indexmap::IndexMap;

use super::field;
use super::filter::IndexSet;
use crate::error::Result;
use crate::storage::dataset::{Dataset, Value};

/// One output row: qualified column name to value, in COLUMNS order
pub type Row = IndexMap<String, Value>;

/// A requested column paired with its local field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column<'q> {
    pub qualified: &'q str,
    pub local: &'q str,
}

/// Resolve every requested column against the dataset
///
/// Fails on the first column that is not a field of `dataset`, before any row
/// is built.
pub fn resolve_columns<'q>(columns: &'q [String], dataset: &Dataset) -> Result<Vec<Column<'q>>> {
    columns
        .iter()
        .map(|name| -> Result<Column<'q>> {
            Ok(Column {
                qualified: name,
                local: field::resolve(name, dataset)?,
            })
        })
        .collect()
}

/// Build output rows for the candidate indices, in record order
pub fn project(dataset: &Dataset, indices: &IndexSet, columns: &[Column<'_>]) -> Vec<Row> {
    let records = dataset.records();

    indices
        .iter()
        .filter_map(|&index| records.get(index))
        .map(|record| {
            columns
                .iter()
                .filter_map(|column| {
                    record
                        .get(column.local)
                        .map(|value| (column.qualified.to_string(), value.clone()))
                })
                .collect()
        })
        .collect()
}
