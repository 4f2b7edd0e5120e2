//! Event log - one DuckDB row per command run
//!
//! Rows live in `events.duckdb` inside the bankline directory and carry the
//! command name, whether it succeeded, and the error message when it did
//! not. Owners and balances are never recorded.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use duckdb::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::event_migrations::EVENT_MIGRATIONS;

pub const EVENT_DB_FILE: &str = "events.duckdb";

/// Who ran the command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cli,
    Library,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Source::Cli => "cli",
            Source::Library => "library",
        }
    }
}

/// A recorded command run, newest first when listed
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub seq: i64,
    pub recorded_at: i64,
    pub source: String,
    pub version: String,
    pub command: String,
    pub outcome: String,
    pub error: Option<String>,
}

impl Event {
    pub fn failed(&self) -> bool {
        self.outcome == "failed"
    }
}

/// Totals over the whole log
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventSummary {
    pub total: u64,
    pub failed: u64,
}

pub struct EventLog {
    conn: Mutex<Connection>,
    path: PathBuf,
    source: Source,
    version: String,
}

impl EventLog {
    /// Open (or create) the log in `bankline_dir` and bring its schema up to date
    pub fn open(bankline_dir: &Path, source: Source, version: impl Into<String>) -> Result<Self> {
        let path = bankline_dir.join(EVENT_DB_FILE);
        let conn = Connection::open(&path)
            .with_context(|| format!("Failed to open event log: {:?}", path))?;

        let log = Self {
            conn: Mutex::new(conn),
            path,
            source,
            version: version.into(),
        };
        log.migrate()?;
        Ok(log)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow!("Event log lock poisoned: {}", e))
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_migrations (name VARCHAR PRIMARY KEY)",
        )?;

        for (name, sql) in EVENT_MIGRATIONS {
            let applied: i64 = conn.query_row(
                "SELECT COUNT(*) FROM schema_migrations WHERE name = ?",
                [name],
                |row| row.get(0),
            )?;
            if applied > 0 {
                continue;
            }
            conn.execute_batch(sql)
                .with_context(|| format!("Event log migration {} failed", name))?;
            conn.execute("INSERT INTO schema_migrations (name) VALUES (?)", [name])?;
        }
        Ok(())
    }

    fn record(&self, command: &str, error: Option<&str>) -> Result<()> {
        let outcome = if error.is_some() { "failed" } else { "ok" };
        self.conn()?.execute(
            "INSERT INTO events (recorded_at, source, version, command, outcome, error)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![
                Utc::now().timestamp_millis(),
                self.source.as_str(),
                &self.version,
                command,
                outcome,
                error,
            ],
        )?;
        Ok(())
    }

    pub fn record_ok(&self, command: &str) -> Result<()> {
        self.record(command, None)
    }

    pub fn record_failure(&self, command: &str, error: &str) -> Result<()> {
        self.record(command, Some(error))
    }

    /// Latest `limit` events, optionally only the failed ones
    pub fn recent(&self, limit: usize, failed_only: bool) -> Result<Vec<Event>> {
        let filter = if failed_only {
            "WHERE outcome = 'failed'"
        } else {
            ""
        };
        let sql = format!(
            "SELECT seq, recorded_at, source, version, command, outcome, error
             FROM events {} ORDER BY seq DESC LIMIT ?",
            filter
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([limit as i64], |row| {
            Ok(Event {
                seq: row.get(0)?,
                recorded_at: row.get(1)?,
                source: row.get(2)?,
                version: row.get(3)?,
                command: row.get(4)?,
                outcome: row.get(5)?,
                error: row.get(6)?,
            })
        })?;
        rows.collect::<duckdb::Result<Vec<_>>>()
            .context("Failed to read events")
    }

    pub fn summary(&self) -> Result<EventSummary> {
        let (total, failed): (i64, i64) = self.conn()?.query_row(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE outcome = 'failed') FROM events",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(EventSummary {
            total: total as u64,
            failed: failed as u64,
        })
    }

    /// Drop events recorded before `cutoff_ms` (unix milliseconds)
    pub fn prune_before(&self, cutoff_ms: i64) -> Result<u64> {
        let removed = self
            .conn()?
            .execute("DELETE FROM events WHERE recorded_at < ?", [cutoff_ms])?;
        Ok(removed as u64)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_creates_empty_log() {
        let dir = tempdir().unwrap();
        let log = EventLog::open(dir.path(), Source::Cli, "1.0.0").unwrap();

        assert!(log.path().exists());
        assert_eq!(log.summary().unwrap().total, 0);
    }

    #[test]
    fn test_reopen_keeps_events() {
        let dir = tempdir().unwrap();
        EventLog::open(dir.path(), Source::Cli, "1.0.0")
            .unwrap()
            .record_ok("demo")
            .unwrap();

        let log = EventLog::open(dir.path(), Source::Cli, "1.0.0").unwrap();
        log.record_ok("run").unwrap();

        let events = log.recent(10, false).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].command, "run");
        assert!(events[0].seq > events[1].seq);
    }

    #[test]
    fn test_failures_carry_error_and_filter() {
        let dir = tempdir().unwrap();
        let log = EventLog::open(dir.path(), Source::Library, "1.0.0").unwrap();

        log.record_ok("credit").unwrap();
        log.record_failure("debit", "Insufficient Funds").unwrap();

        let failed = log.recent(10, true).unwrap();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].failed());
        assert_eq!(failed[0].command, "debit");
        assert_eq!(failed[0].source, "library");
        assert_eq!(failed[0].error.as_deref(), Some("Insufficient Funds"));

        let summary = log.summary().unwrap();
        assert_eq!(summary.total, 2);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_prune_before() {
        let dir = tempdir().unwrap();
        let log = EventLog::open(dir.path(), Source::Cli, "1.0.0").unwrap();
        log.record_ok("demo").unwrap();
        log.record_ok("demo").unwrap();

        assert_eq!(log.prune_before(0).unwrap(), 0);
        assert_eq!(log.prune_before(Utc::now().timestamp_millis() + 1000).unwrap(), 2);
        assert_eq!(log.summary().unwrap().total, 0);
    }
}
