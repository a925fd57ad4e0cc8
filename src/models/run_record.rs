use super::fix::Fix;
use crate::core::geo;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local};
use serde::Serialize;

/// A completed run, immutable once stored.
///
/// `distance_m` and `duration_ms` are derived by the constructor and never
/// set independently; partial runs are not representable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    pub id: i64, // ⇔ runs.id, 0 until assigned by storage
    pub started_at: DateTime<Local>,
    pub ended_at: DateTime<Local>,
    pub start: Fix,
    pub end: Fix,
    pub distance_m: f64,
    pub duration_ms: i64,
    pub notes: String,      // ⇔ runs.notes (TEXT, default '')
    pub created_at: String, // ⇔ runs.created_at (TEXT, ISO8601)
}

impl RunRecord {
    /// The only way to build a record: two resolved fixes plus the session
    /// timestamps. Distance and duration are computed here.
    pub fn from_fixes(
        start: Fix,
        end: Fix,
        started_at: DateTime<Local>,
        ended_at: DateTime<Local>,
        notes: impl Into<String>,
    ) -> AppResult<Self> {
        if ended_at < started_at {
            return Err(AppError::InvalidInterval(format!(
                "end time {} precedes start time {}",
                ended_at.to_rfc3339(),
                started_at.to_rfc3339()
            )));
        }

        let distance_m = geo::distance_meters(
            start.latitude,
            start.longitude,
            end.latitude,
            end.longitude,
        );
        let duration_ms = (ended_at - started_at).num_milliseconds();

        Ok(Self {
            id: 0,
            started_at,
            ended_at,
            start,
            end,
            distance_m,
            duration_ms,
            notes: notes.into(),
            created_at: Local::now().to_rfc3339(),
        })
    }

    pub fn date_str(&self) -> String {
        self.started_at.format("%Y-%m-%d").to_string()
    }

    pub fn start_time_str(&self) -> String {
        self.started_at.format("%H:%M:%S").to_string()
    }

    pub fn end_time_str(&self) -> String {
        self.ended_at.format("%H:%M:%S").to_string()
    }

    /// Pace in minutes per kilometer, `None` for a zero-distance run.
    pub fn pace_min_per_km(&self) -> Option<f64> {
        if self.distance_m <= 0.0 {
            return None;
        }
        let minutes = self.duration_ms as f64 / 60_000.0;
        Some(minutes / (self.distance_m / 1000.0))
    }
}
