//! Implements the `Store` trait using in-memory data for testing purposes.

use crate::store::{Store, StoredValue};
use crate::Result;
use anyhow::bail;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The data behind a `MemoryStore`, keyed by `(scoped, key)`.
#[derive(Debug, Default)]
struct State {
    values: HashMap<(bool, String), String>,
    fail_get: bool,
    fail_set: bool,
    sets: usize,
}

/// An implementation of the `Store` trait that holds everything in memory.
///
/// Clones share the same data, so a test can keep one handle to inspect the store while another
/// handle is boxed inside the code under test. Failures can be switched on to exercise the error
/// paths of loading and saving.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail (`true`) or succeed (`false`).
    pub fn fail_get(&self, fail: bool) {
        self.lock().fail_get = fail;
    }

    /// Makes every subsequent `set` fail (`true`) or succeed (`false`).
    pub fn fail_set(&self, fail: bool) {
        self.lock().fail_set = fail;
    }

    /// Reads a value without going through the async trait.
    pub fn peek(&self, key: &str, scoped: bool) -> Option<String> {
        self.lock().values.get(&(scoped, key.to_string())).cloned()
    }

    /// Writes a value without going through the async trait.
    pub fn insert(&self, key: &str, value: &str, scoped: bool) {
        self.lock()
            .values
            .insert((scoped, key.to_string()), value.to_string());
    }

    /// The number of successful `set` calls so far.
    pub fn set_count(&self) -> usize {
        self.lock().sets
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock only means another test thread panicked; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn get(&mut self, key: &str, scoped: bool) -> Result<Option<StoredValue>> {
        let state = self.lock();
        if state.fail_get {
            bail!("The store is unavailable, unable to get '{key}'");
        }
        Ok(state
            .values
            .get(&(scoped, key.to_string()))
            .map(StoredValue::new))
    }

    async fn set(&mut self, key: &str, value: &str, scoped: bool) -> Result<()> {
        let mut state = self.lock();
        if state.fail_set {
            bail!("The store is unavailable, unable to set '{key}'");
        }
        state
            .values
            .insert((scoped, key.to_string()), value.to_string());
        state.sets += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing() {
        let mut store = MemoryStore::new();
        assert!(store.get("nope", true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("k", "v1", true).await.unwrap();
        store.set("k", "v2", true).await.unwrap();
        assert_eq!(
            store.get("k", true).await.unwrap(),
            Some(StoredValue::new("v2"))
        );
        assert_eq!(store.set_count(), 2);
    }

    #[tokio::test]
    async fn test_scopes_are_separate() {
        let mut store = MemoryStore::new();
        store.set("k", "shared", true).await.unwrap();
        assert!(store.get("k", false).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let handle = MemoryStore::new();
        let mut boxed: Box<dyn Store + Send> = Box::new(handle.clone());
        boxed.set("k", "v", true).await.unwrap();
        assert_eq!(handle.peek("k", true).as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_failures() {
        let mut store = MemoryStore::new();
        store.fail_set(true);
        assert!(store.set("k", "v", true).await.is_err());
        assert_eq!(store.set_count(), 0);
        store.fail_set(false);
        store.fail_get(true);
        store.set("k", "v", true).await.unwrap();
        assert!(store.get("k", true).await.is_err());
    }
}
