use crate::errors::{AppError, AppResult};
use crate::export::model::ExportRun;
use std::path::Path;

pub fn write_csv(dest: &Path, rows: &[ExportRun]) -> AppResult<()> {
    let mut writer =
        csv::Writer::from_path(dest).map_err(|e| AppError::Export(e.to_string()))?;

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::Export(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
