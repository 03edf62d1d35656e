//! Typed access to one remote collection, with a wholesale-replaced cache.

use futures::future::join_all;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::ResourceError;
use crate::models::Resource;
use crate::transport::ResourceTransport;

/// Client wrapper around the collection `T::COLLECTION`.
///
/// The cache only ever changes by a full re-list (`list`/`refresh`).
/// `create`, `update` and `delete` never touch it, so a failed mutation leaves
/// the cached snapshot exactly as it was. Callers refresh after a successful
/// mutation.
pub struct ResourceStore<T: Resource> {
    transport: Arc<dyn ResourceTransport>,
    cache: Arc<Vec<T>>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            _record: PhantomData,
        }
    }
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(transport: Arc<dyn ResourceTransport>) -> Self {
        Self {
            transport,
            cache: Arc::new(Vec::new()),
            _record: PhantomData,
        }
    }

    pub fn collection(&self) -> &'static str {
        T::COLLECTION
    }

    /// Snapshot of the last full listing.
    pub fn cached(&self) -> Arc<Vec<T>> {
        self.cache.clone()
    }

    /// Fetches the whole collection without touching the cache.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn fetch(&self) -> Result<Vec<T>, ResourceError> {
        let raw = self.transport.list(T::COLLECTION).await?;
        let records = raw
            .into_iter()
            .map(decode::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = records.len(), "Fetched collection");
        Ok(records)
    }

    /// Fetches the whole collection and replaces the cache with it.
    pub async fn list(&mut self) -> Result<Arc<Vec<T>>, ResourceError> {
        let records = self.fetch().await?;
        Ok(self.replace_cache(records))
    }

    /// Same as [`list`](Self::list); called after every successful mutation.
    pub async fn refresh(&mut self) -> Result<Arc<Vec<T>>, ResourceError> {
        self.list().await
    }

    /// Installs a full listing as the new cache snapshot.
    pub fn replace_cache(&mut self, records: Vec<T>) -> Arc<Vec<T>> {
        self.cache = Arc::new(records);
        self.cache.clone()
    }

    /// Populates an empty collection from `defaults`, then re-lists.
    ///
    /// The creates are issued concurrently and all of them run to completion;
    /// the first failure is reported and the re-list is skipped. Two callers
    /// racing on an empty collection can both seed it.
    #[instrument(skip(self, defaults), fields(collection = T::COLLECTION))]
    pub async fn seed_if_empty(&mut self, defaults: Vec<T>) -> Result<Arc<Vec<T>>, ResourceError> {
        let existing = self.list().await?;
        if !existing.is_empty() || defaults.is_empty() {
            return Ok(existing);
        }

        let count = defaults.len();
        let results = join_all(defaults.into_iter().map(|record| self.create(record))).await;
        if let Some(err) = results.into_iter().find_map(Result::err) {
            warn!(error = %err, "Seeding failed");
            return Err(err);
        }

        info!(count, "Seeded empty collection with defaults");
        self.list().await
    }

    #[instrument(skip(self, record), fields(collection = T::COLLECTION, id = record.id()))]
    pub async fn create(&self, record: T) -> Result<T, ResourceError> {
        let body = encode(&record)?;
        let created = self.transport.create(T::COLLECTION, body).await?;
        Ok(acknowledged(created, record))
    }

    /// Replaces the record stored under `id` with `record`. The caller merges
    /// unchanged fields in before calling; nothing is patched.
    #[instrument(skip(self, record), fields(collection = T::COLLECTION))]
    pub async fn update(&self, id: &str, record: T) -> Result<T, ResourceError> {
        let body = encode(&record)?;
        let updated = self.transport.update(T::COLLECTION, id, body).await?;
        Ok(acknowledged(updated, record))
    }

    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn delete(&self, id: &str) -> Result<(), ResourceError> {
        self.transport.delete(T::COLLECTION, id).await
    }
}

fn encode<T: Resource>(record: &T) -> Result<Value, ResourceError> {
    Ok(serde_json::to_value(record)?)
}

fn decode<T: Resource>(value: Value) -> Result<T, ResourceError> {
    serde_json::from_value(value).map_err(|e| ResourceError::decode(T::COLLECTION, e))
}

/// The record a successful mutation settled on. A status-only acknowledgement
/// such as `{"id": .., "success": true}` stands for the record that was sent.
fn acknowledged<T: Resource>(response: Value, sent: T) -> T {
    match decode(response) {
        Ok(record) => record,
        Err(err) => {
            debug!(error = %err, "Mutation acknowledged without a full record");
            sent
        }
    }
}
