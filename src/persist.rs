//! Loads and saves a user's weekly records through a `Store`.

use crate::auth::Identity;
use crate::model::Dataset;
use crate::store::Store;
use crate::Result;
use anyhow::Context;
use tracing::{debug, warn};

/// Every storage key starts with this, followed by the identity's id.
pub const KEY_PREFIX: &str = "tracker_";

/// Records are kept in the backend's shared namespace.
const SCOPED: bool = true;

/// The storage key for `identity`.
pub fn storage_key(identity: &Identity) -> String {
    format!("{KEY_PREFIX}{}", identity.id())
}

/// What came back from a `load`.
#[derive(Debug)]
pub enum LoadOutcome {
    /// A stored blob was found and parsed.
    Loaded(Dataset),
    /// Nothing is stored under the key, or the stored value is empty.
    NotFound,
    /// The store failed or the blob could not be parsed.
    LoadError(anyhow::Error),
}

/// Reads and writes whole datasets under per-identity keys. Every save replaces the entire blob.
pub struct Persistence {
    store: Box<dyn Store + Send>,
}

impl Persistence {
    /// Create a new `Persistence` object that will use a dynamically-dispatched `store`.
    pub fn new(store: Box<dyn Store + Send>) -> Self {
        Self { store }
    }

    pub async fn load(&mut self, identity: &Identity) -> LoadOutcome {
        let key = storage_key(identity);
        match self.fetch(&key).await {
            Ok(Some(data)) => {
                debug!("Loaded {} weeks from '{key}'", data.len());
                LoadOutcome::Loaded(data)
            }
            Ok(None) => {
                debug!("Nothing stored at '{key}'");
                LoadOutcome::NotFound
            }
            Err(e) => {
                warn!("Unable to load '{key}': {e:#}");
                LoadOutcome::LoadError(e)
            }
        }
    }

    pub async fn save(&mut self, identity: &Identity, data: &Dataset) -> Result<()> {
        let key = storage_key(identity);
        let blob = data.to_json()?;
        self.store
            .set(&key, &blob, SCOPED)
            .await
            .with_context(|| format!("Unable to save the weekly records to '{key}'"))?;
        debug!("Saved {} weeks to '{key}'", data.len());
        Ok(())
    }

    async fn fetch(&mut self, key: &str) -> Result<Option<Dataset>> {
        let stored = self.store.get(key, SCOPED).await?;
        match stored {
            Some(s) if !s.value.trim().is_empty() => Dataset::from_json(&s.value).map(Some),
            _ => Ok(None),
        }
    }
}
