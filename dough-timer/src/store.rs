use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access batch file: {0}")]
    Io(#[from] std::io::Error),
    #[error("batch data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("batch data is not a list")]
    NotAList,
}

/// The persisted shape of a batch: `{ "id", "name", "endTime" }`.
///
/// `done` is deliberately absent. A loaded record may carry an empty `id` or
/// `name` when the stored element lacked one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBatch {
    pub id: String,
    pub name: String,
    pub end_time: i64,
}

pub trait BatchStore {
    fn load(&self) -> Result<Vec<StoredBatch>, StoreError>;
    fn save(&self, batches: &[StoredBatch]) -> Result<(), StoreError>;
}

/// Decodes stored batch data element by element.
///
/// The top level must be a JSON array. Elements without a finite numeric
/// `endTime` are dropped; missing or non-string `id`/`name` come back empty.
pub fn decode_batches(raw: &str) -> Result<Vec<StoredBatch>, StoreError> {
    let value: Value = serde_json::from_str(raw)?;
    let Value::Array(items) = value else {
        return Err(StoreError::NotAList);
    };

    let total = items.len();
    let batches: Vec<StoredBatch> = items.iter().filter_map(decode_item).collect();
    if batches.len() < total {
        warn!(
            dropped = total - batches.len(),
            "Ignoring stored batches without a usable endTime"
        );
    }
    Ok(batches)
}

fn decode_item(item: &Value) -> Option<StoredBatch> {
    let end_time = match item.get("endTime")? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?,
        _ => return None,
    };
    let text = |key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    Some(StoredBatch {
        id: text("id"),
        name: text("name"),
        end_time,
    })
}

pub fn encode_batches(batches: &[StoredBatch]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(batches)?)
}

/// Batches kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BatchStore for JsonFileStore {
    fn load(&self) -> Result<Vec<StoredBatch>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(vec![]);
        }
        decode_batches(&raw)
    }

    fn save(&self, batches: &[StoredBatch]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, encode_batches(batches)?)?;
        Ok(())
    }
}

/// In-process store holding the encoded JSON. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The last encoded payload, if anything was saved.
    pub fn raw(&self) -> Option<String> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.raw.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BatchStore for MemoryStore {
    fn load(&self) -> Result<Vec<StoredBatch>, StoreError> {
        match self.slot().as_deref() {
            Some(raw) => decode_batches(raw),
            None => Ok(vec![]),
        }
    }

    fn save(&self, batches: &[StoredBatch]) -> Result<(), StoreError> {
        let encoded = encode_batches(batches)?;
        *self.slot() = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(id: &str, name: &str, end_time: i64) -> StoredBatch {
        StoredBatch {
            id: id.to_string(),
            name: name.to_string(),
            end_time,
        }
    }

    #[test]
    fn encodes_camel_case_end_time() {
        let raw = encode_batches(&[stored("batch-1", "pies", 42)]).unwrap();
        assert_eq!(raw, r#"[{"id":"batch-1","name":"pies","endTime":42}]"#);
    }

    #[test]
    fn decode_skips_items_without_numeric_end_time() {
        let raw = r#"[
            {"id": "a", "name": "one", "endTime": 10},
            {"id": "b", "name": "two", "endTime": "10"},
            {"id": "c", "name": "three"},
            null,
            7,
            {"id": "d", "name": "four", "endTime": 20.9, "done": true}
        ]"#;
        let batches = decode_batches(raw).unwrap();
        assert_eq!(batches, vec![stored("a", "one", 10), stored("d", "four", 20)]);
    }

    #[test]
    fn decode_leaves_missing_id_and_name_empty() {
        let batches = decode_batches(r#"[{"endTime": 5, "id": 3}]"#).unwrap();
        assert_eq!(batches, vec![stored("", "", 5)]);
    }

    #[test]
    fn decode_rejects_non_list_payloads() {
        assert!(matches!(
            decode_batches(r#"{"endTime": 5}"#),
            Err(StoreError::NotAList)
        ));
        assert!(matches!(decode_batches("not json"), Err(StoreError::Json(_))));
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("batches.json"));
        let batches = vec![stored("a", "Friday pies", 1_000), stored("b", "rolls", 2_000)];

        store.save(&batches).unwrap();

        assert_eq!(store.load().unwrap(), batches);
    }

    #[test]
    fn file_store_treats_missing_or_blank_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("batches.json"));
        assert!(store.load().unwrap().is_empty());

        std::fs::write(store.path(), "  \n").unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn memory_store_clones_share_payload() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.save(&[stored("a", "pies", 1)]).unwrap();
        assert_eq!(handle.load().unwrap(), vec![stored("a", "pies", 1)]);
        assert!(handle.raw().unwrap().contains("\"endTime\":1"));
    }
}
