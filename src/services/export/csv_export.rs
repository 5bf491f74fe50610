use std::path::Path;

use super::ExportRow;
use crate::types::errors::{AppError, AppResult};

pub fn write_csv(path: &Path, rows: &[ExportRow]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .flush()
        .map_err(|e| AppError::Export(format!("Failed to write {}: {e}", path.display())))
}
