//! Durable storage of completed runs plus the derived aggregates.
//!
//! `RunStore` is the seam between the tracker and persistence; the SQLite
//! implementation republishes the run list and the aggregates on watch
//! channels after every committed write, so consumers can hold a receiver
//! instead of polling.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::fix::Fix;
use crate::models::run_record::RunRecord;
use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{Result, Row, params};
use serde::Serialize;
use tokio::sync::watch;

/// Scalars derived from the full set of persisted runs.
/// Recomputed from the `runs` table on every refresh, never cached
/// independently of it. All zeros over an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RunAggregates {
    pub count: i64,
    pub total_distance_m: f64,
    pub average_distance_m: f64,
    pub total_duration_ms: i64,
}

pub trait RunStore: Send + Sync {
    /// Insert one completed run, returning the assigned id.
    fn insert(&self, record: &RunRecord) -> AppResult<i64>;

    fn get_by_id(&self, id: i64) -> AppResult<Option<RunRecord>>;

    /// All runs, newest start time first.
    fn get_all(&self) -> AppResult<Vec<RunRecord>>;

    /// Runs whose start falls on the given local calendar date.
    fn runs_for_date(&self, date: NaiveDate) -> AppResult<Vec<RunRecord>>;

    /// Returns whether a row was actually removed.
    fn delete(&self, id: i64) -> AppResult<bool>;

    /// Returns the number of rows removed.
    fn delete_all(&self) -> AppResult<usize>;

    fn aggregates(&self) -> AppResult<RunAggregates>;

    /// Latest run list, republished after every committed write.
    fn history_watch(&self) -> watch::Receiver<Vec<RunRecord>>;

    /// Latest aggregates, republished after every committed write.
    fn aggregates_watch(&self) -> watch::Receiver<RunAggregates>;
}

pub struct SqliteRunStore {
    pool: DbPool,
    history_tx: watch::Sender<Vec<RunRecord>>,
    aggregates_tx: watch::Sender<RunAggregates>,
}

impl SqliteRunStore {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::build(DbPool::new(path)?)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        Self::build(DbPool::open_in_memory()?)
    }

    fn build(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn())?;

        let store = Self {
            pool,
            history_tx: watch::channel(Vec::new()).0,
            aggregates_tx: watch::channel(RunAggregates::default()).0,
        };
        store.refresh()?;
        Ok(store)
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Recompute the published views from the table and notify subscribers.
    fn refresh(&self) -> AppResult<()> {
        let history = self.get_all()?;
        let aggregates = self.aggregates()?;
        self.history_tx.send_replace(history);
        self.aggregates_tx.send_replace(aggregates);
        Ok(())
    }

    fn map_row(row: &Row) -> Result<RunRecord> {
        let started_raw: String = row.get("started_at")?;
        let ended_raw: String = row.get("ended_at")?;

        let started_at = parse_timestamp(&started_raw)?;
        let ended_at = parse_timestamp(&ended_raw)?;

        let start = Fix::new(row.get("start_lat")?, row.get("start_lon")?).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Real,
                Box::new(AppError::InvalidCoordinate("start fix out of range".into())),
            )
        })?;
        let end = Fix::new(row.get("end_lat")?, row.get("end_lon")?).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Real,
                Box::new(AppError::InvalidCoordinate("end fix out of range".into())),
            )
        })?;

        Ok(RunRecord {
            id: row.get("id")?,
            started_at,
            ended_at,
            start,
            end,
            distance_m: row.get("distance_m")?,
            duration_ms: row.get("duration_ms")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(AppError::InvalidDate(raw.to_string())),
            )
        })
}

impl RunStore for SqliteRunStore {
    fn insert(&self, record: &RunRecord) -> AppResult<i64> {
        let id = {
            let conn = self.pool.conn();
            conn.execute(
                "INSERT INTO runs (start_date, started_at, ended_at,
                                   start_lat, start_lon, end_lat, end_lon,
                                   distance_m, duration_ms, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    record.date_str(),
                    record.started_at.to_rfc3339(),
                    record.ended_at.to_rfc3339(),
                    record.start.latitude,
                    record.start.longitude,
                    record.end.latitude,
                    record.end.longitude,
                    record.distance_m,
                    record.duration_ms,
                    record.notes,
                    record.created_at,
                ],
            )?;
            conn.last_insert_rowid()
        };

        self.refresh()?;
        Ok(id)
    }

    fn get_by_id(&self, id: i64) -> AppResult<Option<RunRecord>> {
        let conn = self.pool.conn();
        let mut stmt = conn.prepare_cached("SELECT * FROM runs WHERE id = ?1")?;

        let mut rows = stmt.query_map([id], Self::map_row)?;
        match rows.next() {
            Some(r) => Ok(Some(r?)),
            None => Ok(None),
        }
    }

    fn get_all(&self) -> AppResult<Vec<RunRecord>> {
        let conn = self.pool.conn();
        let mut stmt = conn.prepare_cached(
            "SELECT * FROM runs
             ORDER BY started_at DESC, id DESC",
        )?;

        let rows = stmt.query_map([], Self::map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn runs_for_date(&self, date: NaiveDate) -> AppResult<Vec<RunRecord>> {
        let conn = self.pool.conn();
        let mut stmt = conn.prepare_cached(
            "SELECT * FROM runs
             WHERE start_date = ?1
             ORDER BY started_at DESC, id DESC",
        )?;

        let date_str = date.format("%Y-%m-%d").to_string();
        let rows = stmt.query_map([date_str], Self::map_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let removed = {
            let conn = self.pool.conn();
            conn.execute("DELETE FROM runs WHERE id = ?1", [id])?
        };

        if removed > 0 {
            self.refresh()?;
        }
        Ok(removed > 0)
    }

    fn delete_all(&self) -> AppResult<usize> {
        let removed = {
            let conn = self.pool.conn();
            conn.execute("DELETE FROM runs", [])?
        };

        self.refresh()?;
        Ok(removed)
    }

    fn aggregates(&self) -> AppResult<RunAggregates> {
        let conn = self.pool.conn();
        let row = conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(distance_m), 0.0),
                    COALESCE(AVG(distance_m), 0.0),
                    COALESCE(SUM(duration_ms), 0)
             FROM runs",
            [],
            |row| {
                Ok(RunAggregates {
                    count: row.get(0)?,
                    total_distance_m: row.get(1)?,
                    average_distance_m: row.get(2)?,
                    total_duration_ms: row.get(3)?,
                })
            },
        )?;
        Ok(row)
    }

    fn history_watch(&self) -> watch::Receiver<Vec<RunRecord>> {
        self.history_tx.subscribe()
    }

    fn aggregates_watch(&self) -> watch::Receiver<RunAggregates> {
        self.aggregates_tx.subscribe()
    }
}
