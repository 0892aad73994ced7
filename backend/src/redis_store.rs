//! Redis backend. Documents are stored with RedisJSON (`JSON.SET`/`JSON.GET`
//! at the root path), so the server must have the RedisJSON module loaded.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, error, instrument};

use crate::document::DocumentBackend;
use crate::store::{StoreError, StoreResult};

const ROOT_PATH: &str = ".";

impl From<RedisError> for StoreError {
    fn from(e: RedisError) -> Self {
        StoreError::Backend(e.to_string())
    }
}

#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    /// Open a managed connection and ping it. Any failure is `BackendUnavailable`.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let unavailable = |e: RedisError| {
            error!("Error connecting to redis at {}: {}", url, e);
            StoreError::BackendUnavailable(e.to_string())
        };
        let client = redis::Client::open(url).map_err(unavailable)?;
        let conn = ConnectionManager::new(client).await.map_err(unavailable)?;
        let backend = Self { conn };
        backend.ping().await?;
        debug!(%url, "Connected to redis");
        Ok(backend)
    }
}

#[async_trait]
impl DocumentBackend for RedisBackend {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::BackendUnavailable(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let found: bool = conn.exists(key).await?;
        Ok(found)
    }

    #[instrument(skip(self))]
    async fn get_document(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let json: Option<String> = redis::cmd("JSON.GET")
            .arg(key)
            .arg(ROOT_PATH)
            .query_async(&mut conn)
            .await?;
        Ok(json)
    }

    #[instrument(skip(self, json), fields(size = json.len()))]
    async fn set_document(&self, key: &str, json: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: () = redis::cmd("JSON.SET")
            .arg(key)
            .arg(ROOT_PATH)
            .arg(json)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let keys: Vec<String> = conn.keys(pattern).await?;
        debug!("Listed {} keys matching '{}'", keys.len(), pattern);
        Ok(keys)
    }

    #[instrument(skip(self, keys), fields(count = keys.len()))]
    async fn delete_keys(&self, keys: &[String]) -> StoreResult<usize> {
        // DEL with no arguments is a syntax error
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.conn.clone();
        let deleted: usize = conn.del(keys).await?;
        Ok(deleted)
    }
}
