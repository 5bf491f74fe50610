use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

use super::{ExportRow, COLUMNS};
use crate::types::errors::AppResult;

const SHEET_NAME: &str = "Backlog";

pub fn write_xlsx(path: &Path, rows: &[ExportRow]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let header = Format::new().set_bold();
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    sheet.set_column_width(0, 48)?;
    sheet.set_column_width(11, 60)?;

    for (i, row) in rows.iter().enumerate() {
        write_row(sheet, (i + 1) as u32, row)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_row(sheet: &mut Worksheet, r: u32, row: &ExportRow) -> Result<(), XlsxError> {
    sheet.write_string(r, 0, &row.title)?;
    sheet.write_string(r, 1, &row.system)?;
    sheet.write_number(r, 2, f64::from(row.achievements))?;
    sheet.write_number(r, 3, f64::from(row.points))?;
    sheet.write_number(r, 4, row.ra_id as f64)?;

    let optional = [
        (5u16, row.hltb_beat),
        (6, row.hltb_complete),
        (7, row.ra_beat),
        (8, row.ra_master),
        (9, row.ra_players.map(|p| p as f64)),
        (10, row.points_per_hour),
    ];
    for (col, value) in optional {
        if let Some(value) = value {
            sheet.write_number(r, col, value)?;
        }
    }

    if !row.comments.is_empty() {
        sheet.write_string(r, 11, &row.comments)?;
    }
    Ok(())
}
