// SQLite persistence for recorded draft results.

use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};

use crate::catalog::{Captain, TeamCode};
use crate::store::{DraftResultRecord, ResultStore};

/// SQLite-backed [`ResultStore`].
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a SQLite database at `path` and ensure the schema
    /// exists. Pass `":memory:"` for an ephemeral in-memory database (useful
    /// for tests).
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS draft_results (
                id                INTEGER PRIMARY KEY AUTOINCREMENT,
                first_pick        TEXT NOT NULL,
                baron_composition TEXT NOT NULL,
                elder_composition TEXT NOT NULL,
                baron_teams       TEXT NOT NULL,
                elder_teams       TEXT NOT NULL,
                created_at        TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );

            CREATE INDEX IF NOT EXISTS idx_draft_results_created_at
                ON draft_results(created_at);
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the database connection.
    ///
    /// Panics if the mutex is poisoned (another thread panicked while
    /// holding the lock). This should never happen in normal operation.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().expect("database mutex poisoned")
    }

    /// Insert one record. Team lists are stored as JSON arrays of codes; the
    /// id and timestamp are assigned by SQLite.
    pub fn insert_result(&self, record: &DraftResultRecord) -> Result<i64> {
        let conn = self.conn();
        let baron_json =
            serde_json::to_string(&record.baron_teams).context("failed to serialize baron_teams")?;
        let elder_json =
            serde_json::to_string(&record.elder_teams).context("failed to serialize elder_teams")?;
        conn.execute(
            "INSERT INTO draft_results
                (first_pick, baron_composition, elder_composition, baron_teams, elder_teams)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.first_pick.team().code(),
                record.baron_composition,
                record.elder_composition,
                baron_json,
                elder_json,
            ],
        )
        .context("failed to insert draft result")?;
        Ok(conn.last_insert_rowid())
    }

    /// Load every record, newest first.
    pub fn load_results(&self) -> Result<Vec<DraftResultRecord>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare(
                "SELECT id, first_pick, baron_composition, elder_composition, baron_teams, elder_teams, created_at
                 FROM draft_results ORDER BY created_at DESC, id DESC",
            )
            .context("failed to prepare load_results query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(RawRow {
                    id: row.get(0)?,
                    first_pick: row.get(1)?,
                    baron_composition: row.get(2)?,
                    elder_composition: row.get(3)?,
                    baron_teams: row.get(4)?,
                    elder_teams: row.get(5)?,
                    created_at: row.get(6)?,
                })
            })
            .context("failed to query draft results")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map draft result rows")?;

        rows.into_iter().map(RawRow::into_record).collect()
    }
}

/// Column values as stored, before decoding codes and JSON.
struct RawRow {
    id: i64,
    first_pick: String,
    baron_composition: String,
    elder_composition: String,
    baron_teams: String,
    elder_teams: String,
    created_at: String,
}

impl RawRow {
    fn into_record(self) -> Result<DraftResultRecord> {
        let first_pick = Captain::from_code(&self.first_pick).with_context(|| {
            format!("row {}: invalid first_pick {:?}", self.id, self.first_pick)
        })?;
        let baron_teams: Vec<TeamCode> = serde_json::from_str(&self.baron_teams)
            .with_context(|| format!("row {}: invalid baron_teams", self.id))?;
        let elder_teams: Vec<TeamCode> = serde_json::from_str(&self.elder_teams)
            .with_context(|| format!("row {}: invalid elder_teams", self.id))?;
        Ok(DraftResultRecord {
            id: Some(self.id),
            first_pick,
            baron_composition: self.baron_composition,
            elder_composition: self.elder_composition,
            baron_teams,
            elder_teams,
            created_at: Some(self.created_at),
        })
    }
}

#[async_trait]
impl ResultStore for Database {
    async fn append(&self, record: &DraftResultRecord) -> Result<()> {
        self.insert_result(record).map(|_| ())
    }

    async fn fetch_all(&self) -> Result<Vec<DraftResultRecord>> {
        self.load_results()
    }
}
