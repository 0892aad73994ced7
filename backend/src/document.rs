//! The document backend contract.
//!
//! A backend stores one JSON document per key and knows nothing about voters.
//! [`VoterStore`](crate::store::VoterStore) is the only caller and builds every
//! public operation out of these primitives. Implementations include
//! [`MemoryBackend`](crate::memory::MemoryBackend) and
//! [`RedisBackend`](crate::redis_store::RedisBackend).

use async_trait::async_trait;

use crate::store::StoreResult;

#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Short name reported by the health endpoint.
    fn name(&self) -> &'static str;

    /// Round-trip to the backend. Fails with `BackendUnavailable`.
    async fn ping(&self) -> StoreResult<()>;

    /// Whether a document exists under `key`. Transport errors are returned, not folded into `false`.
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// Fetch the JSON text stored under `key`, or `None` if there is none.
    async fn get_document(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the whole document under `key`, creating it if absent.
    async fn set_document(&self, key: &str, json: &str) -> StoreResult<()>;

    /// Keys matching a `*` glob. Order is backend-defined.
    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// Delete `keys` in one call and return how many existed. Missing keys are not an error.
    async fn delete_keys(&self, keys: &[String]) -> StoreResult<usize>;
}
