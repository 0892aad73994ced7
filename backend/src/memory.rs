use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error};

use crate::document::DocumentBackend;
use crate::keys::matches_pattern;
use crate::store::{StoreError, StoreResult};

/// Transient backend over a guarded map. Documents are kept as JSON text so
/// they go through the same encoding as the Redis backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, HashMap<String, String>>> {
        self.documents.lock().map_err(|e| {
            error!("Failed to acquire document map lock: {}", e);
            StoreError::Backend("document map lock poisoned".into())
        })
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.lock().map(|_| ())
    }

    async fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.lock()?.contains_key(key))
    }

    async fn get_document(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set_document(&self, key: &str, json: &str) -> StoreResult<()> {
        self.lock()?.insert(key.to_string(), json.to_string());
        Ok(())
    }

    async fn list_keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let keys: Vec<String> = self
            .lock()?
            .keys()
            .filter(|k| matches_pattern(pattern, k))
            .cloned()
            .collect();
        debug!("Listed {} keys matching '{}'", keys.len(), pattern);
        Ok(keys)
    }

    async fn delete_keys(&self, keys: &[String]) -> StoreResult<usize> {
        let mut documents = self.lock()?;
        Ok(keys.iter().filter(|k| documents.remove(k.as_str()).is_some()).count())
    }
}
