//! Dataset representation
//!
//! A Dataset is an ordered sequence of flat records plus a kind tag. Once
//! built it never changes; the store shares it behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Scalar field values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    String(String),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::String(_) => "string",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

/// A map of local field names to values
pub type Record = HashMap<String, Value>;

/// The domain a dataset was ingested from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    /// Course section records
    Courses,
    /// Room records
    Rooms,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Courses => write!(f, "courses"),
            DatasetKind::Rooms => write!(f, "rooms"),
        }
    }
}

/// Summary returned when listing datasets
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetInfo {
    pub id: String,
    pub kind: DatasetKind,
    #[serde(rename = "numRows")]
    pub num_rows: usize,
}

/// A loaded, immutable dataset
#[derive(Debug, Clone)]
pub struct Dataset {
    id: String,
    kind: DatasetKind,
    records: Vec<Record>,
    /// Field names of the first record
    schema: HashSet<String>,
}

impl Dataset {
    pub fn new(id: impl Into<String>, kind: DatasetKind, records: Vec<Record>) -> Self {
        let schema = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            id: id.into(),
            kind,
            records,
            schema,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> DatasetKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether `field` (a local name, without the dataset prefix) is in the schema
    pub fn has_field(&self, field: &str) -> bool {
        self.schema.contains(field)
    }

    pub fn info(&self) -> DatasetInfo {
        DatasetInfo {
            id: self.id.clone(),
            kind: self.kind,
            num_rows: self.records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(dept: &str, avg: f64) -> Record {
        let mut record = Record::new();
        record.insert("dept".into(), dept.into());
        record.insert("avg".into(), avg.into());
        record
    }

    #[test]
    fn test_schema_from_first_record() {
        let dataset = Dataset::new(
            "courses",
            DatasetKind::Courses,
            vec![section("cpsc", 80.0), section("math", 70.0)],
        );

        assert!(dataset.has_field("dept"));
        assert!(dataset.has_field("avg"));
        assert!(!dataset.has_field("seats"));
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.info(),
            DatasetInfo {
                id: "courses".into(),
                kind: DatasetKind::Courses,
                num_rows: 2,
            }
        );
    }

    #[test]
    fn test_empty_dataset_has_no_fields() {
        let dataset = Dataset::new("empty", DatasetKind::Rooms, Vec::new());
        assert!(dataset.is_empty());
        assert!(!dataset.has_field("seats"));
    }

    #[test]
    fn test_value_serde() {
        let value: Value = serde_json::from_str("97.5").unwrap();
        assert_eq!(value, Value::Number(97.5));

        let value: Value = serde_json::from_str("\"cpsc\"").unwrap();
        assert_eq!(value.as_str(), Some("cpsc"));

        assert!(serde_json::from_str::<Value>("true").is_err());
    }

    #[test]
    fn test_info_json() {
        let info = DatasetInfo {
            id: "rooms".into(),
            kind: DatasetKind::Rooms,
            num_rows: 364,
        };
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!({ "id": "rooms", "kind": "rooms", "numRows": 364 })
        );
    }
}
