//! Tabular export of scan results (`.xlsx` or `.csv`).
pub mod csv_export;
pub mod xlsx_export;

use serde::Serialize;
use std::path::Path;

use crate::services::backlog::BacklogEntry;
use crate::services::progress::ProgressRecord;
use crate::types::errors::AppResult;
use crate::types::hours::round_tenth;

/// Column headers, in output order.
pub const COLUMNS: [&str; 12] = [
    "Title",
    "System",
    "Achievements",
    "Points",
    "RA_ID",
    "HLTB_Beat",
    "HLTB_Complete",
    "RA_Beat",
    "RA_Master",
    "RA_Players",
    "Points_Per_Hour",
    "Comments",
];

/// One spreadsheet row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "System")]
    pub system: String,
    #[serde(rename = "Achievements")]
    pub achievements: u32,
    #[serde(rename = "Points")]
    pub points: u32,
    #[serde(rename = "RA_ID")]
    pub ra_id: u64,
    #[serde(rename = "HLTB_Beat")]
    pub hltb_beat: Option<f64>,
    #[serde(rename = "HLTB_Complete")]
    pub hltb_complete: Option<f64>,
    #[serde(rename = "RA_Beat")]
    pub ra_beat: Option<f64>,
    #[serde(rename = "RA_Master")]
    pub ra_master: Option<f64>,
    #[serde(rename = "RA_Players")]
    pub ra_players: Option<u64>,
    #[serde(rename = "Points_Per_Hour")]
    pub points_per_hour: Option<f64>,
    #[serde(rename = "Comments")]
    pub comments: String,
    /// Carried for reports only; not a column.
    #[serde(skip)]
    pub record: Option<ProgressRecord>,
}

impl ExportRow {
    /// Row for a backlog entry, with its progress record when one exists.
    pub fn new(entry: &BacklogEntry, record: Option<&ProgressRecord>) -> Self {
        let mut row = Self {
            title: entry.title.clone(),
            system: entry.system.clone(),
            achievements: entry.achievements,
            points: entry.points,
            ra_id: entry.id,
            hltb_beat: None,
            hltb_complete: None,
            ra_beat: None,
            ra_master: None,
            ra_players: None,
            points_per_hour: None,
            comments: String::new(),
            record: record.cloned(),
        };

        if let Some(record) = record {
            row.hltb_beat = record.beat_hours;
            row.hltb_complete = record.complete_hours;
            row.ra_beat = record.ra_beat_hours;
            row.ra_master = record.ra_master_hours;
            row.ra_players = record.ra_players;
            row.comments = record.comment.clone();
        }
        row.points_per_hour = efficiency(row.points, row.mastery_hours());
        row
    }

    /// Best available mastery time: RA median, else HLTB completionist, else HLTB beat.
    pub fn mastery_hours(&self) -> Option<f64> {
        self.ra_master.or(self.hltb_complete).or(self.hltb_beat)
    }

    pub fn mastery_source(&self) -> &'static str {
        if self.ra_master.is_some() {
            "RA"
        } else {
            "HLTB"
        }
    }

    pub fn has_time_data(&self) -> bool {
        self.hltb_beat.is_some() || self.ra_master.is_some()
    }
}

/// Points per hour, one decimal. `None` without positive points and time.
pub fn efficiency(points: u32, hours: Option<f64>) -> Option<f64> {
    let hours = hours.filter(|h| *h > 0.0)?;
    if points == 0 {
        return None;
    }
    Some(round_tenth(f64::from(points) / hours))
}

/// Rows for every entry, in backlog order.
pub fn build_rows<F>(entries: &[BacklogEntry], lookup: F) -> Vec<ExportRow>
where
    F: Fn(u64) -> Option<ProgressRecord>,
{
    entries
        .iter()
        .map(|entry| {
            let record = lookup(entry.id);
            ExportRow::new(entry, record.as_ref())
        })
        .collect()
}

/// Output format, from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }
}

/// Write rows to `path`, choosing the writer from its extension.
pub fn write_rows(path: &Path, rows: &[ExportRow]) -> AppResult<()> {
    match ExportFormat::from_path(path) {
        ExportFormat::Csv => csv_export::write_csv(path, rows),
        ExportFormat::Xlsx => xlsx_export::write_xlsx(path, rows),
    }?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/export_tests.rs"]
mod tests;
