use crate::errors::{AppError, AppResult};
use crate::export::model::ExportRun;
use std::fs::File;
use std::path::Path;

pub fn write_json(dest: &Path, rows: &[ExportRun]) -> AppResult<()> {
    let file = File::create(dest)?;
    serde_json::to_writer_pretty(file, rows).map_err(|e| AppError::Export(e.to_string()))?;
    Ok(())
}
