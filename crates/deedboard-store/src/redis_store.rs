//! Redis-backed store.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::{Error, KvStore, Result};

/// A [`KvStore`] talking to Redis.
///
/// The connection is opened on first use, so a server whose Redis is
/// down at startup still comes up and reports store errors per request.
/// `ConnectionManager` reconnects on its own after that.
pub struct RedisStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    /// Create a store for a `redis://` or `rediss://` URL.
    ///
    /// Only the URL is checked here; no connection is made.
    pub fn open(url: &str) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(Error::config("Redis URL is empty"));
        }
        let client = redis::Client::open(url)
            .map_err(|e| Error::config(format!("Invalid Redis URL: {e}")))?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                log::info!("Connecting to Redis");
                self.client.get_connection_manager().await
            })
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        Ok(raw.map(Value::String))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;
        log::debug!("KEYS {pattern} matched {}", keys.len());
        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
