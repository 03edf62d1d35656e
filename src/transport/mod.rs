//! The seam between resource stores and the service holding the collections.

use async_trait::async_trait;
use serde_json::Value;
use strum::{AsRefStr, Display};

use crate::errors::ResourceError;

pub mod http;
pub mod memory;

pub use self::http::HttpTransport;
pub use self::memory::{BackendError, MemoryBackend};

/// The four calls a resource page can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
}

/// Untyped access to named record collections.
///
/// Records travel as JSON objects; the store layers typing on top. There are
/// no query parameters: `list` always returns the whole collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceTransport: Send + Sync {
    async fn list(&self, collection: &str) -> Result<Vec<Value>, ResourceError>;

    /// Inserts `record`, which already carries its client-generated `id`.
    async fn create(&self, collection: &str, record: Value) -> Result<Value, ResourceError>;

    /// Replaces the whole record stored under `id`.
    async fn update(&self, collection: &str, id: &str, record: Value)
        -> Result<Value, ResourceError>;

    async fn delete(&self, collection: &str, id: &str) -> Result<(), ResourceError>;
}
