//! Implements the `Store` trait with a JSON file standing in for the remote backend.

use crate::store::{Store, StoredValue};
use crate::{utils, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, trace};

/// The on-disk layout of the store file.
///
/// ```json
/// {
///   "shared": { "tracker_dXNlckBleGFtcGxlLmNvbQ==": "[...]" },
///   "personal": {}
/// }
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    shared: BTreeMap<String, String>,
    #[serde(default)]
    personal: BTreeMap<String, String>,
}

impl StoreFile {
    fn scope(&self, scoped: bool) -> &BTreeMap<String, String> {
        if scoped {
            &self.shared
        } else {
            &self.personal
        }
    }

    fn scope_mut(&mut self, scoped: bool) -> &mut BTreeMap<String, String> {
        if scoped {
            &mut self.shared
        } else {
            &mut self.personal
        }
    }
}

/// A key-value store persisted as one JSON file. The file is read on every call and rewritten
/// whole on every `set`, so the last writer wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }


    async fn read(&self) -> Result<StoreFile> {
        if !self.path.is_file() {
            trace!("No store file at {}", self.path.display());
            return Ok(StoreFile::default());
        }
        utils::deserialize(&self.path)
            .await
            .context("The store file is corrupt")
    }
}

#[async_trait::async_trait]
impl Store for FileStore {
    async fn get(&mut self, key: &str, scoped: bool) -> Result<Option<StoredValue>> {
        trace!("get {key} (scoped: {scoped})");
        let file = self.read().await?;
        Ok(file.scope(scoped).get(key).map(StoredValue::new))
    }

    async fn set(&mut self, key: &str, value: &str, scoped: bool) -> Result<()> {
        trace!("set {key} (scoped: {scoped})");
        let mut file = self.read().await?;
        file.scope_mut(scoped)
            .insert(key.to_string(), value.to_string());
        utils::serialize(&self.path, &file)
            .await
            .with_context(|| format!("Unable to store the value for '{key}'"))?;
        debug!("Stored {} bytes at '{key}'", value.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("store.json"));
        assert!(store.get("k", true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        FileStore::new(&path).set("k", "v", true).await.unwrap();
        let mut other = FileStore::new(&path);
        assert_eq!(
            other.get("k", true).await.unwrap(),
            Some(StoredValue::new("v"))
        );
        assert!(other.get("k", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("store.json"));
        store.set("k", "first", true).await.unwrap();
        store.set("other", "x", true).await.unwrap();
        store.set("k", "second", true).await.unwrap();
        assert_eq!(store.get("k", true).await.unwrap().unwrap().value, "second");
        assert_eq!(store.get("other", true).await.unwrap().unwrap().value, "x");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        utils::write(&path, "{{{").await.unwrap();
        let mut store = FileStore::new(&path);
        assert!(store.get("k", true).await.is_err());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("missing").join("store.json"));
        assert!(store.set("k", "v", true).await.is_err());
    }
}
