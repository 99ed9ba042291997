//! SQLite-backed persistence for the stats slice.
//!
//! Only [`UserStats`] ever touches disk -- one JSON record in a key-value
//! table. Session config and session state are session-local; a process
//! restart always returns to idle, even mid-session.
//!
//! The database lives at `~/.config/codelock/codelock.db`.

use rusqlite::{params, Connection};

use super::data_dir;
use crate::error::StorageError;
use crate::stats::UserStats;

/// Key under which the stats blob is stored.
const STATS_KEY: &str = "user-stats";

/// SQLite database holding the persisted stats record.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/codelock/codelock.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("codelock.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests and ephemeral embedders).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::QueryFailed(e.to_string()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Load the persisted stats record, if any.
    ///
    /// Absence of the record is not an error -- it means defaults.
    pub fn load_stats(&self) -> Result<Option<UserStats>, StorageError> {
        match self.kv_get(STATS_KEY)? {
            Some(raw) => {
                let stats = serde_json::from_str(&raw)
                    .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
                Ok(Some(stats))
            }
            None => Ok(None),
        }
    }

    /// Persist the stats record, replacing any previous one.
    pub fn save_stats(&self, stats: &UserStats) -> Result<(), StorageError> {
        let raw = serde_json::to_string(stats)
            .map_err(|e| StorageError::CorruptRecord(e.to_string()))?;
        self.kv_set(STATS_KEY, &raw)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}
