//! SQLite-based guess log and accuracy aggregation.
//!
//! Every submitted guess is appended as one row. The scheduler never reads
//! this -- hosts treat recording as fire-and-forget, and a failed insert
//! must never block or corrupt the in-memory game state.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

use crate::error::CoreError;

use super::data_dir;

/// Per-subject accuracy aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectResult {
    /// Catalog index of the subject that was asked.
    pub item: usize,
    /// Guesses that named the right subject.
    pub correct: u64,
    /// All guesses for this subject.
    pub total: u64,
}

impl SubjectResult {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Whole-database totals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GuessTotals {
    pub guesses: u64,
    pub correct: u64,
    pub sessions: u64,
}

/// SQLite database for guess records.
pub struct GuessDb {
    conn: Connection,
}

impl GuessDb {
    /// Open the database at `~/.config/shadowguess/guesses.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("guesses.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS guesses (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                session_id   TEXT NOT NULL,
                actual_item  INTEGER NOT NULL,
                guessed_item INTEGER,
                created_at   TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_guesses_actual_item ON guesses(actual_item);
            CREATE INDEX IF NOT EXISTS idx_guesses_session_id ON guesses(session_id);",
        )?;
        Ok(())
    }

    /// Append one guess.
    ///
    /// `guessed_item` is `None` when the typed guess matched no catalog
    /// entry; such rows always count as incorrect in the aggregates.
    pub fn record_guess(
        &self,
        session_id: Uuid,
        actual_item: usize,
        guessed_item: Option<usize>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO guesses (session_id, actual_item, guessed_item, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session_id.to_string(),
                actual_item as i64,
                guessed_item.map(|g| g as i64),
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Per-subject accuracy, sorted by accuracy descending.
    pub fn results(&self) -> Result<Vec<SubjectResult>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT actual_item,
                    COUNT(*),
                    COALESCE(SUM(CASE WHEN guessed_item = actual_item THEN 1 ELSE 0 END), 0)
             FROM guesses
             GROUP BY actual_item
             ORDER BY actual_item",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(SubjectResult {
                item: row.get::<_, i64>(0)? as usize,
                total: row.get(1)?,
                correct: row.get(2)?,
            })
        })?;

        let mut results: Vec<SubjectResult> = rows.collect::<Result<_, _>>()?;
        results.sort_by(|a, b| {
            b.accuracy()
                .partial_cmp(&a.accuracy())
                .expect("accuracy is never NaN")
        });
        Ok(results)
    }

    /// Whole-database guess totals.
    pub fn totals(&self) -> Result<GuessTotals, rusqlite::Error> {
        self.conn
            .query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN guessed_item = actual_item THEN 1 ELSE 0 END), 0),
                        COUNT(DISTINCT session_id)
                 FROM guesses",
                [],
                |row| {
                    Ok(GuessTotals {
                        guesses: row.get(0)?,
                        correct: row.get(1)?,
                        sessions: row.get(2)?,
                    })
                },
            )
            .optional()
            .map(|t| t.unwrap_or_default())
    }
}
