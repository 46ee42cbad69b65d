// Result store: the persistence collaborator behind the statistics feature.

use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::{Captain, Side, TeamCode};
use crate::draft::DraftResult;
use crate::stats::composition_key;

/// A completed draft as persisted for statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResultRecord {
    /// Store-assigned row id. `None` before the record is appended.
    #[serde(default)]
    pub id: Option<i64>,
    pub first_pick: Captain,
    /// Canonical (order-independent) key of `baron_teams`.
    pub baron_composition: String,
    /// Canonical (order-independent) key of `elder_teams`.
    pub elder_composition: String,
    /// Baron side in acquisition order, GEN first.
    pub baron_teams: Vec<TeamCode>,
    /// Elder side in acquisition order, HLE first.
    pub elder_teams: Vec<TeamCode>,
    /// Store-assigned creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl DraftResultRecord {
    /// Build the record to append for a completed draft.
    pub fn from_result(result: &DraftResult) -> Self {
        DraftResultRecord {
            id: None,
            first_pick: result.first_pick,
            baron_composition: composition_key(&result.baron_team),
            elder_composition: composition_key(&result.elder_team),
            baron_teams: result.baron_team.clone(),
            elder_teams: result.elder_team.clone(),
            created_at: None,
        }
    }

    /// Teams of the given side, in acquisition order.
    pub fn side_teams(&self, side: Side) -> &[TeamCode] {
        match side {
            Side::Baron => &self.baron_teams,
            Side::Elder => &self.elder_teams,
        }
    }
}

/// Append-only store of draft results.
///
/// `fetch_all` returns every record appended so far, newest first.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn append(&self, record: &DraftResultRecord) -> Result<()>;

    async fn fetch_all(&self) -> Result<Vec<DraftResultRecord>>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<DraftResultRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics if the mutex is poisoned.
    fn records(&self) -> MutexGuard<'_, Vec<DraftResultRecord>> {
        self.records.lock().expect("memory store mutex poisoned")
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn append(&self, record: &DraftResultRecord) -> Result<()> {
        let mut records = self.records();
        let stored = DraftResultRecord {
            id: Some(records.len() as i64 + 1),
            created_at: Some(chrono::Utc::now().to_rfc3339()),
            ..record.clone()
        };
        records.push(stored);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<DraftResultRecord>> {
        Ok(self.records().iter().rev().cloned().collect())
    }
}
