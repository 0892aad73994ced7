use serde::{Serialize, Deserialize, Deserializer};
use time::OffsetDateTime;

/// One poll a voter took part in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteRecord {
    pub poll_id: u64,
    pub vote_id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub vote_date: OffsetDateTime,
}

/// A voter and their participation history, in the order it was appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Voter {
    pub voter_id: u64,
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vote_history: Vec<VoteRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub version: String,
    pub backend: String,
    pub uptime: f64,
    pub users_processed: u64,
    pub errors_encountered: u64,
}

impl Voter {
    pub fn new(voter_id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            voter_id,
            name: name.into(),
            email: email.into(),
            vote_history: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: VoteRecord) -> Self {
        self.vote_history.push(record);
        self
    }

    /// First history entry for `poll_id`. Duplicates are possible; later ones are shadowed.
    pub fn poll(&self, poll_id: u64) -> Option<&VoteRecord> {
        self.vote_history.iter().find(|r| r.poll_id == poll_id)
    }

    pub fn poll_mut(&mut self, poll_id: u64) -> Option<&mut VoteRecord> {
        self.vote_history.iter_mut().find(|r| r.poll_id == poll_id)
    }

    pub fn remove_poll(&mut self, poll_id: u64) -> Option<VoteRecord> {
        let idx = self.vote_history.iter().position(|r| r.poll_id == poll_id)?;
        Some(self.vote_history.remove(idx))
    }

}

/// Documents written with an empty history may carry `null` instead of `[]`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<VoteRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<VoteRecord>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl VoteRecord {
    pub fn new(poll_id: u64, vote_id: u64, vote_date: OffsetDateTime) -> Self {
        Self { poll_id, vote_id, vote_date }
    }
}
