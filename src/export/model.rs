use crate::models::run_record::RunRecord;
use serde::Serialize;

/// Flattened export row, one per run.
#[derive(Debug, Serialize)]
pub struct ExportRun {
    pub id: i64,
    pub date: String,
    pub started_at: String,
    pub ended_at: String,
    pub start_lat: f64,
    pub start_lon: f64,
    pub end_lat: f64,
    pub end_lon: f64,
    pub distance_m: f64,
    pub duration_ms: i64,
    pub pace_min_per_km: Option<f64>,
    pub notes: String,
}

impl From<&RunRecord> for ExportRun {
    fn from(r: &RunRecord) -> Self {
        Self {
            id: r.id,
            date: r.date_str(),
            started_at: r.started_at.to_rfc3339(),
            ended_at: r.ended_at.to_rfc3339(),
            start_lat: r.start.latitude,
            start_lon: r.start.longitude,
            end_lat: r.end.latitude,
            end_lon: r.end.longitude,
            distance_m: r.distance_m,
            duration_ms: r.duration_ms,
            pace_min_per_km: r.pace_min_per_km(),
            notes: r.notes.clone(),
        }
    }
}
