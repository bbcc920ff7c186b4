//! SQLite-backed lesson history.
//!
//! Provides persistent storage for:
//! - The capped log of completed lessons
//! - Key-value store for application state (first lesson timestamp)

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

use super::data_dir;
use super::migrations;
use crate::error::{DatabaseError, Result};
use crate::history::{HistoryEntry, HistoryStore, ModeHistory, HISTORY_CAPACITY};
use crate::mode::ModeId;

const FIRST_LESSON_KEY: &str = "first_lesson_at";

fn encode_time(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(row_id: i64, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            DatabaseError::CorruptRow {
                row_id,
                message: format!("bad timestamp '{raw}': {e}"),
            }
            .into()
        })
}

/// SQLite database for lesson history.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/bolchaal/bolchaal.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("bolchaal.db");
        Self::open_at(&path)
    }

    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Number of stored lessons.
    pub fn history_len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM mode_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl HistoryStore for Database {
    fn load(&self) -> Result<ModeHistory> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, mode, completed_at FROM mode_history ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (row_id, mode, completed_at) = row?;
            let mode: ModeId = mode.parse().map_err(|e: crate::error::ValidationError| {
                DatabaseError::CorruptRow {
                    row_id,
                    message: e.to_string(),
                }
            })?;
            entries.push(HistoryEntry::new(mode, decode_time(row_id, &completed_at)?));
        }
        // Rows are trimmed by id, so id order is the log order.
        Ok(ModeHistory::from_appended(entries))
    }

    fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO mode_history (mode, completed_at) VALUES (?1, ?2)",
            params![entry.mode.as_str(), encode_time(entry.completed_at)],
        )?;
        tx.execute(
            "DELETE FROM mode_history WHERE id NOT IN (
                SELECT id FROM mode_history ORDER BY id DESC LIMIT ?1
            )",
            params![HISTORY_CAPACITY as i64],
        )?;
        tx.execute(
            "INSERT OR IGNORE INTO kv (key, value) VALUES (?1, ?2)",
            params![FIRST_LESSON_KEY, encode_time(entry.completed_at)],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn first_lesson_at(&self) -> Result<Option<DateTime<Utc>>> {
        match self.kv_get(FIRST_LESSON_KEY)? {
            Some(raw) => Ok(Some(decode_time(0, &raw)?)),
            None => Ok(None),
        }
    }

    fn clear(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM mode_history", [])?;
        tx.execute("DELETE FROM kv WHERE key = ?1", params![FIRST_LESSON_KEY])?;
        tx.commit()?;
        Ok(())
    }
}
