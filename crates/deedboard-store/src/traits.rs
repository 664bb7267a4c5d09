//! The key-value store contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A remote string-keyed store with glob listing.
///
/// Every call may fail independently (connectivity, configuration,
/// store-side errors). Implementations never retry; callers decide.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads a value.
    ///
    /// Backends return either the raw stored text as [`Value::String`] or
    /// an already-parsed structure; readers must accept both.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Writes a value, replacing whatever was there.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Lists keys matching a glob pattern such as `deeds:2024-01-01:*`.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;

    /// Removes a key. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}
