//! Query orchestration
//!
//! Execution order:
//! 1. Resolve the target dataset from the first projected column
//! 2. Evaluate WHERE into a candidate index set
//! 3. Resolve every projected column
//! 4. Check the OPTIONS key set and the ORDER column
//! 5. Enforce the result cap
//! 6. Project rows, then apply ORDER

use iql::Query;

use super::filter;
use super::project::{self, Row};
use super::sort;
use crate::error::{Error, Result};
use crate::storage::dataset::Dataset;
use crate::storage::store::DatasetStore;

/// Maximum number of rows a query may return
pub const MAX_RESULTS: usize = 5000;

/// Execute a parsed query against the store
pub async fn execute(store: &DatasetStore, query: &Query) -> Result<Vec<Row>> {
    let dataset = store.get(query.dataset_id()).await?;
    run(query, &dataset)
}

/// Execute a parsed query against one dataset
pub fn run(query: &Query, dataset: &Dataset) -> Result<Vec<Row>> {
    let candidates = filter::evaluate(&query.filter, dataset)?;
    let columns = project::resolve_columns(&query.options.columns, dataset)?;
    query.options.validate()?;

    tracing::debug!(
        "Query on {} matched {} of {} rows ({} filter nodes)",
        dataset.id(),
        candidates.len(),
        dataset.len(),
        query.filter.size()
    );

    if candidates.len() > MAX_RESULTS {
        return Err(Error::ResultTooLarge {
            count: candidates.len(),
            limit: MAX_RESULTS,
        });
    }

    let mut rows = project::project(dataset, &candidates, &columns);

    if let Some(ref order) = query.options.order {
        sort::sort_rows(&mut rows, order);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::dataset::{DatasetKind, Record, Value};
    use serde_json::json;

    fn numbered(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                let mut record = Record::new();
                record.insert("avg".into(), ((i % 100) as i64).into());
                record.insert("dept".into(), if i % 2 == 0 { "cpsc" } else { "math" }.into());
                record
            })
            .collect();
        Dataset::new("courses", DatasetKind::Courses, records)
    }

    fn query(value: serde_json::Value) -> Query {
        iql::parse(&value).unwrap()
    }

    #[test]
    fn test_filter_project_sort() {
        let dataset = numbered(10);
        let rows = run(
            &query(json!({
                "WHERE": { "AND": [
                    { "IS": { "courses_dept": "cpsc" } },
                    { "GT": { "courses_avg": 3 } }
                ]},
                "OPTIONS": { "COLUMNS": ["courses_avg", "courses_dept"], "ORDER": "courses_avg" }
            })),
            &dataset,
        )
        .unwrap();

        let avgs: Vec<_> = rows.iter().map(|r| r["courses_avg"].clone()).collect();
        assert_eq!(avgs, vec![Value::Number(4.0), Value::Number(6.0), Value::Number(8.0)]);
        assert!(rows.iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_result_cap_boundary() {
        let everything = json!({ "WHERE": {}, "OPTIONS": { "COLUMNS": ["courses_avg"] } });

        let rows = run(&query(everything.clone()), &numbered(MAX_RESULTS)).unwrap();
        assert_eq!(rows.len(), MAX_RESULTS);

        let err = run(&query(everything), &numbered(MAX_RESULTS + 1)).unwrap_err();
        assert!(matches!(err, Error::ResultTooLarge { count, limit } if count == 5001 && limit == 5000));
    }

    #[test]
    fn test_column_errors_abort() {
        let dataset = numbered(3);
        let err = run(
            &query(json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_avg", "rooms_seats"] }
            })),
            &dataset,
        )
        .unwrap_err();
        assert!(matches!(err, Error::CrossDataset { .. }));

        let err = run(
            &query(json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_avg", "courses_uuid"] }
            })),
            &dataset,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_field_errors_win_over_cap() {
        let err = run(
            &query(json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_nope"] }
            })),
            &numbered(MAX_RESULTS + 10),
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
    }

    #[test]
    fn test_options_checked_after_columns() {
        let dataset = numbered(3);

        let err = run(
            &query(json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_avg"], "ORDER": "courses_dept" }
            })),
            &dataset,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));

        let err = run(
            &query(json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_nope"], "ORDER": "courses_dept", "FORM": "TABLE" }
            })),
            &dataset,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));

        let err = run(
            &query(json!({
                "WHERE": { "GT": { "courses_avg": "high" } },
                "OPTIONS": { "COLUMNS": ["courses_avg"], "FORM": "TABLE" }
            })),
            &dataset,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Type { .. }));
    }

    #[tokio::test]
    async fn test_execute_missing_dataset() {
        let store = DatasetStore::new();
        let err = execute(
            &store,
            &query(json!({ "WHERE": {}, "OPTIONS": { "COLUMNS": ["courses_avg"] } })),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::NotFound { id } if id == "courses"));
    }

    #[tokio::test]
    async fn test_missing_dataset_reported_before_operands() {
        let store = DatasetStore::new();
        for input in [
            json!({
                "WHERE": { "IS": { "courses_dept": 5 } },
                "OPTIONS": { "COLUMNS": ["courses_dept"] }
            }),
            json!({
                "WHERE": {},
                "OPTIONS": { "COLUMNS": ["courses_dept"], "ORDER": "courses_avg" }
            }),
        ] {
            let err = execute(&store, &query(input)).await.unwrap_err();
            assert!(matches!(err, Error::NotFound { .. }));
        }
    }
}
