use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use super::ResourceTransport;
use crate::errors::ResourceError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("No record with id {id} in {collection}")]
    NotFound { collection: String, id: String },

    #[error("Record must be a JSON object with a string id")]
    MissingId,

    #[error("Record id {body} does not match path id {path}")]
    IdMismatch { path: String, body: String },
}

impl From<BackendError> for ResourceError {
    fn from(err: BackendError) -> Self {
        ResourceError::new(err.to_string())
    }
}

/// Collections held in process memory, in insertion order.
///
/// Ids are not checked for uniqueness on insert; update and delete act on the
/// first record carrying the id.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    collections: Arc<DashMap<String, Vec<Value>>>,
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-populated with `records` under `collection`.
    pub fn with_records(collection: &str, records: Vec<Value>) -> Self {
        let backend = Self::new();
        backend.collections.insert(collection.to_string(), records);
        backend
    }

    pub fn all(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .map(|records| records.value().clone())
            .unwrap_or_default()
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .get(collection)
            .map_or(0, |records| records.len())
    }

    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    pub fn insert(&self, collection: &str, record: Value) -> Result<Value, BackendError> {
        if record_id(&record).is_none() {
            return Err(BackendError::MissingId);
        }
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    pub fn replace(&self, collection: &str, id: &str, record: Value) -> Result<Value, BackendError> {
        match record_id(&record) {
            None => return Err(BackendError::MissingId),
            Some(body) if body != id => {
                return Err(BackendError::IdMismatch {
                    path: id.to_string(),
                    body: body.to_string(),
                })
            }
            Some(_) => {}
        }

        let mut records = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let slot = records
            .iter_mut()
            .find(|existing| record_id(existing) == Some(id))
            .ok_or_else(|| not_found(collection, id))?;
        *slot = record.clone();
        Ok(record)
    }

    pub fn remove(&self, collection: &str, id: &str) -> Result<Value, BackendError> {
        let mut records = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| not_found(collection, id))?;
        let index = records
            .iter()
            .position(|existing| record_id(existing) == Some(id))
            .ok_or_else(|| not_found(collection, id))?;
        Ok(records.remove(index))
    }
}

fn not_found(collection: &str, id: &str) -> BackendError {
    BackendError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    }
}

#[async_trait]
impl ResourceTransport for MemoryBackend {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, ResourceError> {
        Ok(self.all(collection))
    }

    async fn create(&self, collection: &str, record: Value) -> Result<Value, ResourceError> {
        Ok(self.insert(collection, record)?)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        record: Value,
    ) -> Result<Value, ResourceError> {
        Ok(self.replace(collection, id, record)?)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), ResourceError> {
        self.remove(collection, id)?;
        Ok(())
    }
}
