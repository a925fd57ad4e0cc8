//! Export of the run history to csv/json files.

pub mod csv;
pub mod json;
pub mod model;

use crate::db::log::rtlog;
use crate::db::store::{RunStore, SqliteRunStore};
use crate::errors::{AppError, AppResult};
use crate::ui::messages;
use crate::utils::date;
use clap::ValueEnum;
use model::ExportRun;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export runs (optionally filtered by period) to `file`.
/// Returns the number of exported rows.
pub fn run_export(
    store: &SqliteRunStore,
    format: ExportFormat,
    file: &str,
    period: Option<&str>,
    force: bool,
) -> AppResult<usize> {
    //
    // 1. Overwrite guard
    //
    let dest = Path::new(file);
    if dest.exists() && !force {
        return Err(AppError::Export(format!(
            "File '{}' already exists (use --force to overwrite)",
            dest.display()
        )));
    }

    //
    // 2. Collect rows
    //
    let mut runs = store.get_all()?;
    if let Some(p) = period {
        let (from, to) = date::period_bounds(p)?;
        runs.retain(|r| {
            let d = r.started_at.date_naive();
            d >= from && d <= to
        });
    }

    let rows: Vec<ExportRun> = runs.iter().map(ExportRun::from).collect();

    //
    // 3. Write
    //
    match format {
        ExportFormat::Csv => csv::write_csv(dest, &rows)?,
        ExportFormat::Json => json::write_json(dest, &rows)?,
    }

    messages::success(format!(
        "Exported {} run(s) to {}",
        rows.len(),
        dest.display()
    ));

    rtlog(
        &store.pool().conn(),
        "export",
        file,
        &format!("Exported {} run(s)", rows.len()),
    )?;

    Ok(rows.len())
}
