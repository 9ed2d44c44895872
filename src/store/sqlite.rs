use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use tracing::{debug, info, warn};

use crate::constants::DEFAULT_BUSY_TIMEOUT_SECS;

use super::error::StoreError;
use super::{DecisionRecord, DecisionStore};

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS decisions (
    id INTEGER PRIMARY KEY,
    url TEXT,
    daire TEXT,
    esas TEXT,
    karar TEXT,
    tarih TEXT,
    raw_text TEXT
);
";

const FETCH_SQL: &str = "SELECT daire, esas, karar, tarih, raw_text FROM decisions WHERE id = ?1";

/// SQLite-backed store over the `decisions` table.
///
/// Opens a fresh read-only connection per lookup so the store can be shared across
/// threads and tolerates a concurrent writer. WAL mode is switched on once, when the
/// store is opened; a database that cannot be written stays in its current mode and
/// is still readable.
#[derive(Debug, Clone)]
pub struct SqliteDecisionStore {
    path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteDecisionStore {
    /// Points the store at an existing database and switches it to WAL when possible.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let store = Self {
            path: path.to_path_buf(),
            busy_timeout: Duration::from_secs(DEFAULT_BUSY_TIMEOUT_SECS),
        };
        match store.enable_wal() {
            Ok(mode) => info!(
                path = %path.display(),
                journal_mode = %mode,
                "Using decision database"
            ),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Could not switch decision database to WAL, reading in its current mode"
            ),
        }
        Ok(store)
    }

    /// Creates the database and `decisions` table if missing.
    pub fn initialize<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);

        Self::open(path)
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Inserts or replaces a decision row.
    pub fn insert(&self, record: &DecisionRecord, url: Option<&str>) -> Result<(), StoreError> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        conn.execute(
            "INSERT OR REPLACE INTO decisions (id, url, daire, esas, karar, tarih, raw_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                url,
                record.chamber,
                record.esas,
                record.karar,
                record.date,
                record.text
            ],
        )?;
        Ok(())
    }

    /// Returns the journal mode in effect afterwards.
    fn enable_wal(&self) -> Result<String, StoreError> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_WRITE)?;
        let mode =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        Ok(mode)
    }

    fn connect(&self, flags: OpenFlags) -> Result<Connection, StoreError> {
        let conn = Connection::open_with_flags(&self.path, flags | OpenFlags::SQLITE_OPEN_NO_MUTEX)
            .map_err(|source| StoreError::Open {
                path: self.path.clone(),
                source,
            })?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }
}

impl DecisionStore for SqliteDecisionStore {
    fn fetch(&self, id: i64) -> Result<Option<DecisionRecord>, StoreError> {
        let conn = self.connect(OpenFlags::SQLITE_OPEN_READ_ONLY)?;

        let record = conn
            .query_row(FETCH_SQL, params![id], |row| {
                Ok(DecisionRecord {
                    id,
                    chamber: row.get(0)?,
                    esas: row.get(1)?,
                    karar: row.get(2)?,
                    date: row.get(3)?,
                    text: row.get(4)?,
                })
            })
            .optional()
            .map_err(|source| StoreError::Query { id, source })?;

        if record.is_none() {
            debug!(id, "Decision not found");
        }
        Ok(record)
    }
}
