// Statistics client: saves completed drafts and reads back the rankings.
//
// Statistics are optional. Every operation degrades to `false` / empty when
// no store is configured or the store fails, so the draft and share flow
// never depends on it.

use std::sync::Arc;

use tracing::{error, info, warn};

use super::composition::{aggregate_all, aggregate_compositions, AllStats, CompositionStat};
use crate::catalog::Side;
use crate::config::{Config, StatsBackend};
use crate::db::Database;
use crate::draft::DraftResult;
use crate::store::{DraftResultRecord, MemoryStore, ResultStore};

/// Either a configured result store or nothing.
#[derive(Clone)]
pub enum StatsClient {
    /// A store is configured and ready.
    Active(Arc<dyn ResultStore>),
    /// Statistics are turned off or unavailable.
    Disabled,
}

impl StatsClient {
    /// Wrap an existing store.
    pub fn with_store(store: Arc<dyn ResultStore>) -> Self {
        StatsClient::Active(store)
    }

    /// Build a `StatsClient` from the application config.
    ///
    /// Returns `Disabled` when statistics are turned off, when the SQLite
    /// backend has no database path, or when the database cannot be opened.
    pub fn from_config(config: &Config) -> Self {
        let stats = &config.stats;
        if !stats.enabled {
            info!("statistics disabled in config");
            return StatsClient::Disabled;
        }

        match stats.backend {
            StatsBackend::Memory => StatsClient::Active(Arc::new(MemoryStore::new())),
            StatsBackend::Sqlite if stats.db_path.trim().is_empty() => {
                warn!("statistics enabled but stats.db_path is empty; disabling");
                StatsClient::Disabled
            }
            StatsBackend::Sqlite => match Database::open(&stats.db_path) {
                Ok(db) => StatsClient::Active(Arc::new(db)),
                Err(e) => {
                    warn!("failed to open statistics database {}: {:#}", stats.db_path, e);
                    StatsClient::Disabled
                }
            },
        }
    }

    /// Whether a store is available.
    pub fn is_configured(&self) -> bool {
        matches!(self, StatsClient::Active(_))
    }

    /// Record a completed draft. Returns whether it was stored.
    pub async fn save_result(&self, result: &DraftResult) -> bool {
        let StatsClient::Active(store) = self else {
            warn!("statistics store not configured; result not saved");
            return false;
        };

        let record = DraftResultRecord::from_result(result);
        match store.append(&record).await {
            Ok(()) => {
                info!(
                    first_pick = %record.first_pick,
                    baron = %record.baron_composition,
                    elder = %record.elder_composition,
                    "draft result saved"
                );
                true
            }
            Err(e) => {
                error!("failed to save draft result: {:#}", e);
                false
            }
        }
    }

    /// Top `limit` compositions for one side. Empty when unavailable.
    pub async fn composition_stats(&self, side: Side, limit: usize) -> Vec<CompositionStat> {
        match self.fetch_records().await {
            Some(records) => aggregate_compositions(&records, side, limit),
            None => Vec::new(),
        }
    }

    /// Rankings for both sides plus the total number of recorded drafts,
    /// computed from a single fetch. Zeroed when unavailable.
    pub async fn all_stats(&self, limit: usize) -> AllStats {
        match self.fetch_records().await {
            Some(records) => aggregate_all(&records, limit),
            None => AllStats::default(),
        }
    }

    async fn fetch_records(&self) -> Option<Vec<DraftResultRecord>> {
        let StatsClient::Active(store) = self else {
            return None;
        };
        match store.fetch_all().await {
            Ok(records) => Some(records),
            Err(e) => {
                error!("failed to fetch draft results: {:#}", e);
                None
            }
        }
    }
}
