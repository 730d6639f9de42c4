//! Record sources - the seam to the ingestion collaborator
//!
//! The engine never parses uploaded archives. Whatever turns an upload into
//! records implements [`RecordSource`]; the facade awaits it and installs
//! the result. [`JsonRecordFile`] is the source used by the CLI.

use super::dataset::{Record, Value};
use anyhow::Context;
use std::future::Future;
use std::path::PathBuf;

/// Something that can produce the records of one dataset
pub trait RecordSource {
    fn load(&self) -> impl Future<Output = anyhow::Result<Vec<Record>>> + Send;
}

/// A JSON file holding an array of flat objects
///
/// ```json
/// [
///   { "dept": "cpsc", "id": "310", "avg": 78.2 },
///   { "dept": "math", "id": "200", "avg": 71.9 }
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonRecordFile {
    pub path: PathBuf,
}

impl JsonRecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for JsonRecordFile {
    async fn load(&self) -> anyhow::Result<Vec<Record>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {:?}", self.path))?;

        let records = parse_records(&content)
            .with_context(|| format!("Failed to parse records in {:?}", self.path))?;

        tracing::debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }
}

/// Parse a JSON array of flat objects into records
pub fn parse_records(content: &str) -> anyhow::Result<Vec<Record>> {
    let raw: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(content)?;

    raw.into_iter()
        .enumerate()
        .map(|(index, object)| {
            object
                .into_iter()
                .map(|(key, value)| -> anyhow::Result<(String, Value)> {
                    let value = match value {
                        serde_json::Value::String(s) => Value::String(s),
                        serde_json::Value::Number(n) => n
                            .as_f64()
                            .map(Value::Number)
                            .ok_or_else(|| anyhow::anyhow!("record {} field '{}' is out of range", index, key))?,
                        other => anyhow::bail!(
                            "record {} field '{}' must be a string or number, got {}",
                            index,
                            key,
                            other
                        ),
                    };
                    Ok((key, value))
                })
                .collect::<anyhow::Result<Record>>()
        })
        .collect()
}
