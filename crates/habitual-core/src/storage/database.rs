//! SQLite-based storage for the user's profile, habits and log.
//!
//! Habits and the profile are stored as JSON documents so the wire shape
//! stays the single source of truth. Log entries get one row per
//! `(date, key)` pair, which keeps single toggles cheap.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Transaction};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::habit::{Habit, HabitList};
use crate::log::{DailyLog, DayEntry, LogValue};
use crate::onboarding::UserProfile;

/// Current schema version.
const SCHEMA_VERSION: i32 = 1;

/// SQLite database for habit data.
pub struct Database {
    conn: Connection,
}

fn corrupt(table: &str, err: impl std::fmt::Display) -> DatabaseError {
    DatabaseError::CorruptRow {
        table: table.to_string(),
        message: err.to_string(),
    }
}

impl Database {
    /// Open the database at `~/.config/habitual/habitual.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("habitual.db");
        Self::open_at(&path)
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn schema_version(&self) -> i32 {
        self.conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .unwrap_or(0)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY
                );",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        if self.schema_version() < 1 {
            self.conn
                .execute_batch(
                    "BEGIN;
                    CREATE TABLE IF NOT EXISTS profile (
                        id    INTEGER PRIMARY KEY CHECK (id = 1),
                        data  TEXT NOT NULL
                    );

                    CREATE TABLE IF NOT EXISTS habits (
                        id        TEXT PRIMARY KEY,
                        position  INTEGER NOT NULL,
                        data      TEXT NOT NULL
                    );

                    CREATE TABLE IF NOT EXISTS logs (
                        date   TEXT NOT NULL,
                        key    TEXT NOT NULL,
                        value  TEXT NOT NULL,
                        PRIMARY KEY (date, key)
                    );

                    CREATE INDEX IF NOT EXISTS idx_logs_key ON logs(key);

                    DELETE FROM schema_version;
                    INSERT INTO schema_version (version) VALUES (1);
                    COMMIT;",
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
            tracing::info!(version = SCHEMA_VERSION, "migrated database schema");
        }
        Ok(())
    }

    pub fn load_profile(&self) -> Result<Option<UserProfile>> {
        let data: Option<String> = self
            .conn
            .query_row("SELECT data FROM profile WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        match data {
            Some(d) => Ok(Some(serde_json::from_str(&d).map_err(|e| corrupt("profile", e))?)),
            None => Ok(None),
        }
    }

    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_profile(&tx, Some(profile))?;
        tx.commit()?;
        Ok(())
    }

    /// Habits in list order.
    pub fn load_habits(&self) -> Result<HabitList> {
        let mut stmt = self
            .conn
            .prepare("SELECT data FROM habits ORDER BY position")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut habits = Vec::new();
        for row in rows {
            let habit: Habit = serde_json::from_str(&row?).map_err(|e| corrupt("habits", e))?;
            habits.push(habit);
        }
        Ok(HabitList::from_vec(habits)?)
    }

    /// Replace the stored list with `habits`.
    pub fn save_habits(&mut self, habits: &HabitList) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_habits(&tx, habits)?;
        tx.commit()?;
        tracing::debug!(count = habits.len(), "saved habits");
        Ok(())
    }

    pub fn load_log(&self) -> Result<DailyLog> {
        let mut stmt = self
            .conn
            .prepare("SELECT date, key, value FROM logs ORDER BY date, key")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut log = DailyLog::new();
        let mut current: Option<(String, DayEntry)> = None;
        for row in rows {
            let (date, key, raw) = row?;
            let value: LogValue = serde_json::from_str(&raw).map_err(|e| corrupt("logs", e))?;
            if !current.as_ref().is_some_and(|(d, _)| *d == date) {
                if let Some((d, entry)) = current.take() {
                    log.insert_raw(d, entry);
                }
                current = Some((date, DayEntry::new()));
            }
            if let Some((_, entry)) = current.as_mut() {
                entry.insert(key, value);
            }
        }
        if let Some((d, entry)) = current {
            log.insert_raw(d, entry);
        }
        Ok(log)
    }

    /// Replace the stored log with `log`.
    pub fn save_log(&mut self, log: &DailyLog) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_log(&tx, log)?;
        tx.commit()?;
        tracing::debug!(days = log.len(), "saved log");
        Ok(())
    }

    /// Replace one day's rows. An absent or empty entry clears the day.
    pub fn save_day(&mut self, date: &str, entry: Option<&DayEntry>) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM logs WHERE date = ?1", params![date])?;
        if let Some(entry) = entry {
            insert_day(&tx, date, entry)?;
        }
        tx.commit()?;
        tracing::debug!(date, keys = entry.map_or(0, DayEntry::len), "saved log day");
        Ok(())
    }

    /// Replace everything in one transaction.
    pub fn replace_all(
        &mut self,
        profile: Option<&UserProfile>,
        habits: &HabitList,
        log: &DailyLog,
    ) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_profile(&tx, profile)?;
        write_habits(&tx, habits)?;
        write_log(&tx, log)?;
        tx.commit()?;
        tracing::info!(habits = habits.len(), days = log.len(), "replaced all data");
        Ok(())
    }
}

fn write_profile(tx: &Transaction<'_>, profile: Option<&UserProfile>) -> Result<()> {
    match profile {
        Some(profile) => {
            tx.execute(
                "INSERT OR REPLACE INTO profile (id, data) VALUES (1, ?1)",
                params![serde_json::to_string(profile)?],
            )?;
        }
        None => {
            tx.execute("DELETE FROM profile", [])?;
        }
    }
    Ok(())
}

fn write_habits(tx: &Transaction<'_>, habits: &HabitList) -> Result<()> {
    tx.execute("DELETE FROM habits", [])?;
    let mut stmt = tx.prepare("INSERT INTO habits (id, position, data) VALUES (?1, ?2, ?3)")?;
    for (position, habit) in habits.iter().enumerate() {
        stmt.execute(params![habit.id, position as i64, serde_json::to_string(habit)?])?;
    }
    Ok(())
}

fn write_log(tx: &Transaction<'_>, log: &DailyLog) -> Result<()> {
    tx.execute("DELETE FROM logs", [])?;
    for (date, entry) in log.iter() {
        insert_day(tx, date, entry)?;
    }
    Ok(())
}

fn insert_day(tx: &Transaction<'_>, date: &str, entry: &DayEntry) -> Result<()> {
    let mut stmt = tx.prepare_cached("INSERT INTO logs (date, key, value) VALUES (?1, ?2, ?3)")?;
    for (key, value) in entry.iter() {
        stmt.execute(params![date, key, serde_json::to_string(value)?])?;
    }
    Ok(())
}
