//! Voter persistence on top of a [`DocumentBackend`].
//!
//! The store holds no locks and adds no transactions. Each public operation is
//! a short sequence of backend calls, so multi-step operations race with
//! concurrent writers:
//!
//! - `add_voter` checks existence and then writes; two concurrent adds of the
//!   same new id can both succeed, the later write winning.
//! - `list_voters` enumerates keys and then fetches each one. A key deleted in
//!   between is skipped.
//! - `delete_all` enumerates and then bulk-deletes that exact key set.
//! - The poll operations read the voter, edit the history and write it back.

use std::sync::Arc;

use shared::models::{VoteRecord, Voter};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::{BackendKind, StoreConfig};
use crate::document::DocumentBackend;
use crate::keys::{key_for, prefix_pattern};
use crate::memory::MemoryBackend;
use crate::redis_store::RedisBackend;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Voter with id {0} already exists")]
    AlreadyExists(u64),
    #[error("Voter with id {0} does not exist")]
    NotFound(u64),
    #[error("Voter {voter_id} has no poll with id {poll_id}")]
    PollNotFound { voter_id: u64, poll_id: u64 },
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("Backend error: {0}")]
    Backend(String),
    #[error("Malformed voter document: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Process-wide handle to one backend. Cheap to clone.
#[derive(Clone)]
pub struct VoterStore {
    backend: Arc<dyn DocumentBackend>,
}

impl std::fmt::Debug for VoterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoterStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl VoterStore {
    pub fn new(backend: impl DocumentBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Build the configured backend. A Redis backend is pinged while connecting.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let store = match config.backend {
            BackendKind::Memory => Self::in_memory(),
            BackendKind::Redis => Self::new(RedisBackend::connect(&config.redis_url).await?),
        };
        info!(backend = store.backend_name(), "Voter store ready");
        Ok(store)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.backend.ping().await
    }

    async fn fetch(&self, voter_id: u64) -> StoreResult<Voter> {
        let key = key_for(voter_id);
        match self.backend.get_document(&key).await? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(StoreError::NotFound(voter_id)),
        }
    }

    async fn upsert(&self, voter: &Voter) -> StoreResult<()> {
        let key = key_for(voter.voter_id);
        let json = serde_json::to_string(voter)?;
        debug!(%key, "Upserting voter");
        self.backend.set_document(&key, &json).await
    }

    #[instrument(skip(self, voter), fields(voter_id = voter.voter_id))]
    pub async fn add_voter(&self, voter: &Voter) -> StoreResult<()> {
        if self.backend.exists(&key_for(voter.voter_id)).await? {
            return Err(StoreError::AlreadyExists(voter.voter_id));
        }
        self.upsert(voter).await
    }

    #[instrument(skip(self))]
    pub async fn get_voter(&self, voter_id: u64) -> StoreResult<Voter> {
        self.fetch(voter_id).await
    }

    /// Unconditional upsert; creates the voter if absent. The stored id is always `voter_id`.
    #[instrument(skip(self, voter))]
    pub async fn update_voter(&self, voter_id: u64, mut voter: Voter) -> StoreResult<Voter> {
        if voter.voter_id != voter_id {
            warn!(body_id = voter.voter_id, "Body voter id differs from path id, using path id");
            voter.voter_id = voter_id;
        }
        self.upsert(&voter).await?;
        Ok(voter)
    }

    #[instrument(skip(self))]
    pub async fn list_voters(&self) -> StoreResult<Vec<Voter>> {
        let keys = self.backend.list_keys(&prefix_pattern()).await?;
        let mut voters = Vec::with_capacity(keys.len());
        for key in &keys {
            match self.backend.get_document(key).await? {
                Some(json) => voters.push(serde_json::from_str(&json)?),
                None => debug!(%key, "Key vanished during listing, skipping"),
            }
        }
        Ok(voters)
    }

    #[instrument(skip(self))]
    pub async fn delete_voter(&self, voter_id: u64) -> StoreResult<()> {
        let key = key_for(voter_id);
        if !self.backend.exists(&key).await? {
            return Err(StoreError::NotFound(voter_id));
        }
        self.backend.delete_keys(std::slice::from_ref(&key)).await?;
        debug!(%key, "Deleted voter");
        Ok(())
    }

    /// Returns how many voters were removed.
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> StoreResult<usize> {
        let keys = self.backend.list_keys(&prefix_pattern()).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        let deleted = self.backend.delete_keys(&keys).await?;
        info!(deleted, "Deleted all voters");
        Ok(deleted)
    }

    pub async fn voter_polls(&self, voter_id: u64) -> StoreResult<Vec<VoteRecord>> {
        Ok(self.fetch(voter_id).await?.vote_history)
    }

    pub async fn voter_poll(&self, voter_id: u64, poll_id: u64) -> StoreResult<VoteRecord> {
        self.fetch(voter_id)
            .await?
            .poll(poll_id)
            .cloned()
            .ok_or(StoreError::PollNotFound { voter_id, poll_id })
    }

    /// Appends without checking for an existing entry with the same poll id.
    #[instrument(skip(self, record), fields(poll_id = record.poll_id))]
    pub async fn add_voter_poll(&self, voter_id: u64, record: VoteRecord) -> StoreResult<()> {
        let mut voter = self.fetch(voter_id).await?;
        voter.vote_history.push(record);
        self.upsert(&voter).await
    }

    #[instrument(skip(self, record))]
    pub async fn update_voter_poll(&self, voter_id: u64, poll_id: u64, record: VoteRecord) -> StoreResult<()> {
        let mut voter = self.fetch(voter_id).await?;
        let slot = voter
            .poll_mut(poll_id)
            .ok_or(StoreError::PollNotFound { voter_id, poll_id })?;
        *slot = record;
        self.upsert(&voter).await
    }

    #[instrument(skip(self))]
    pub async fn delete_voter_poll(&self, voter_id: u64, poll_id: u64) -> StoreResult<()> {
        let mut voter = self.fetch(voter_id).await?;
        voter
            .remove_poll(poll_id)
            .ok_or(StoreError::PollNotFound { voter_id, poll_id })?;
        self.upsert(&voter).await
    }
}
