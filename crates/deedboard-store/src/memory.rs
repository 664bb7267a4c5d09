//! In-memory store.
//!
//! Used by tests and local runs without Redis. Values may be held either
//! as raw text (what [`KvStore::set`] writes) or as pre-parsed structures
//! inserted with [`MemoryStore::insert_raw`], so both read shapes can be
//! exercised. Faults can be injected per operation.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Error, KvStore, Result};

#[derive(Default)]
struct Faults {
    listing: bool,
    reads: HashSet<String>,
    deletes: HashSet<String>,
}

/// A [`KvStore`] backed by a `HashMap`.
///
/// Listing returns keys in lexicographic order.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
    faults: RwLock<Faults>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value as-is, bypassing the text encoding `set` applies.
    pub async fn insert_raw(&self, key: impl Into<String>, value: Value) {
        self.entries.write().await.insert(key.into(), value);
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no keys.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Make every `keys` call fail (or stop failing).
    pub async fn fail_listing(&self, fail: bool) {
        self.faults.write().await.listing = fail;
    }

    /// Make `get` fail for one key.
    pub async fn fail_reads_for(&self, key: impl Into<String>) {
        self.faults.write().await.reads.insert(key.into());
    }

    /// Make `delete` fail for one key.
    pub async fn fail_deletes_for(&self, key: impl Into<String>) {
        self.faults.write().await.deletes.insert(key.into());
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        if self.faults.read().await.reads.contains(key) {
            return Err(Error::unavailable("get", key));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        if self.faults.read().await.listing {
            return Err(Error::unavailable("keys", pattern));
        }
        let matcher = glob::Pattern::new(pattern)?;
        let mut keys: Vec<String> = self
            .entries
            .read()
            .await
            .keys()
            .filter(|k| matcher.matches(k))
            .cloned()
            .collect();
        keys.sort();
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        if self.faults.read().await.deletes.contains(key) {
            return Err(Error::unavailable("delete", key));
        }
        Ok(self.entries.write().await.remove(key).is_some())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
