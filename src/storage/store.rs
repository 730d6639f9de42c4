//! Dataset store - the id to dataset mapping
//!
//! Writers (add/remove) take the write lock; readers (get/list) take the read
//! lock. Datasets are handed out as `Arc<Dataset>`, so a reader keeps a whole
//! dataset even if it is removed while a query is still running.

use super::dataset::{Dataset, DatasetInfo, DatasetKind, Record};
use crate::error::{Error, Result};
use crate::validation::validate_dataset_id;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// All datasets loaded in this process
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<HashMap<String, Arc<Dataset>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a dataset and return the ids of every loaded dataset
    pub async fn add(&self, id: &str, kind: DatasetKind, records: Vec<Record>) -> Result<Vec<String>> {
        validate_dataset_id(id)?;
        let dataset = Arc::new(Dataset::new(id, kind, records));

        let mut datasets = self.datasets.write().await;
        if datasets.contains_key(id) {
            return Err(Error::Duplicate { id: id.to_string() });
        }

        tracing::info!("Added dataset {} ({}, {} rows)", id, kind, dataset.len());
        datasets.insert(id.to_string(), dataset);

        let mut ids: Vec<String> = datasets.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    /// Remove a dataset, returning its id
    pub async fn remove(&self, id: &str) -> Result<String> {
        validate_dataset_id(id)?;

        let mut datasets = self.datasets.write().await;
        match datasets.remove(id) {
            Some(dataset) => {
                tracing::info!("Removed dataset {} ({} rows)", id, dataset.len());
                Ok(id.to_string())
            }
            None => Err(Error::NotFound { id: id.to_string() }),
        }
    }

    /// Fetch a dataset by id
    pub async fn get(&self, id: &str) -> Result<Arc<Dataset>> {
        self.datasets
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    /// Check whether a dataset is loaded
    pub async fn contains(&self, id: &str) -> bool {
        self.datasets.read().await.contains_key(id)
    }

    /// Summaries of every loaded dataset, sorted by id
    pub async fn list(&self) -> Vec<DatasetInfo> {
        let mut infos: Vec<DatasetInfo> = self
            .datasets
            .read()
            .await
            .values()
            .map(|dataset| dataset.info())
            .collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }
}
