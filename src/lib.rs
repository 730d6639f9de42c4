//! insight - tabular dataset query engine
//!
//! Datasets are ordered sequences of flat records. Queries filter them with a
//! boolean tree, project a set of columns, and optionally sort by one column.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     InsightFacade (async)                  │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐                 ┌──────────────────────┐ │
//! │  │  IQL Parser  │                 │   RecordSource       │ │
//! │  │ (shape/type) │                 │  (ingestion seam)    │ │
//! │  └──────┬───────┘                 └──────────┬───────────┘ │
//! │         ▼                                    ▼             │
//! │  ┌───────────────────────────────┐  ┌─────────────────────┐│
//! │  │        Query Engine (sync)    │  │    Dataset Store    ││
//! │  │  filter → project → sort      │◄─┤  RwLock<id → Arc>   ││
//! │  └───────────────────────────────┘  └─────────────────────┘│
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod query;
pub mod storage;
pub mod validation;

pub use error::{Error, ErrorClass, Result};

use std::sync::Arc;

pub use query::Row;
pub use storage::dataset::{Dataset, DatasetInfo, DatasetKind, Record, Value};
pub use storage::source::{JsonRecordFile, RecordSource};
pub use storage::store::DatasetStore;

/// The main engine handle
#[derive(Debug, Clone, Default)]
pub struct InsightFacade {
    store: Arc<DatasetStore>,
}

impl InsightFacade {
    /// Create a facade with an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add already-ingested records as a dataset
    pub async fn add_dataset(
        &self,
        id: &str,
        kind: DatasetKind,
        records: Vec<Record>,
    ) -> Result<Vec<String>> {
        self.store.add(id, kind, records).await
    }

    /// Await an ingestion source, then add its records as a dataset
    pub async fn add_dataset_from<S: RecordSource>(
        &self,
        id: &str,
        kind: DatasetKind,
        source: &S,
    ) -> Result<Vec<String>> {
        validation::validate_dataset_id(id)?;
        if self.store.contains(id).await {
            return Err(Error::Duplicate { id: id.to_string() });
        }

        let records = source.load().await.map_err(|err| Error::Ingest {
            id: id.to_string(),
            source: err,
        })?;

        self.store.add(id, kind, records).await
    }

    /// Remove a dataset, returning its id
    pub async fn remove_dataset(&self, id: &str) -> Result<String> {
        self.store.remove(id).await
    }

    /// List loaded datasets
    pub async fn list_datasets(&self) -> Vec<DatasetInfo> {
        self.store.list().await
    }

    /// Execute a JSON query object
    pub async fn perform_query(&self, input: &serde_json::Value) -> Result<Vec<Row>> {
        let parsed = iql::parse(input)?;
        query::execute(&self.store, &parsed).await
    }

    /// Execute JSON query text
    pub async fn perform_query_str(&self, input: &str) -> Result<Vec<Row>> {
        let parsed = iql::parse_str(input)?;
        query::execute(&self.store, &parsed).await
    }
}
