//! ORDER evaluation

use std::cmp::Ordering;

use super::project::Row;
use crate::storage::dataset::Value;

/// Sort rows ascending by one column
///
/// The sort is stable, so rows with equal keys keep their record order.
pub fn sort_rows(rows: &mut [Row], column: &str) {
    rows.sort_by(|a, b| compare_values(a.get(column), b.get(column)));
}

/// Total order over optional values
///
/// Missing values sort first, then numbers by magnitude, then strings by
/// code point.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Number(a)), Some(Value::Number(b))) => a.total_cmp(b),
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        (Some(Value::Number(_)), Some(Value::String(_))) => Ordering::Less,
        (Some(Value::String(_)), Some(Value::Number(_))) => Ordering::Greater,
    }
}
