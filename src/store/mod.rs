//! The key-value store the weekly records are persisted in.
//!
//! The store is an external collaborator: an opaque, asynchronous `get`/`set` service holding one
//! string value per key. The `scoped` flag chooses between the shared and the personal namespace
//! of the backend. There is no versioning; a `set` overwrites whatever was there.
mod file_store;
mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::Result;
use serde::{Deserialize, Serialize};

/// A value returned by `Store::get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
}

impl StoredValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// An asynchronous key-value service. Either call may fail with a generic error.
#[async_trait::async_trait]
pub trait Store {
    /// Returns the value held at `key`, or `None` if nothing is stored there.
    async fn get(&mut self, key: &str, scoped: bool) -> Result<Option<StoredValue>>;

    /// Stores `value` at `key`, replacing any previous value.
    async fn set(&mut self, key: &str, value: &str, scoped: bool) -> Result<()>;
}
