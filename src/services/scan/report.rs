//! Backlog reports: summary statistics and completion estimate.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::services::export::ExportRow;
use crate::services::matcher::MatchKind;
use crate::types::errors::{AppError, AppResult};

const TOP_SYSTEMS: usize = 10;
const WEEKS_PER_MONTH: f64 = 4.33;
const WEEKS_PER_YEAR: f64 = 52.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchQuality {
    pub exact: usize,
    pub fuzzy: usize,
    pub loose: usize,
    pub poor: usize,
    pub none: usize,
    /// Rows with no progress record yet.
    pub unscanned: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemCount {
    pub system: String,
    pub games: usize,
    pub mastery_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTitle {
    pub title: String,
    pub value: f64,
}

/// RA mastery vs HLTB completionist over games that have both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeComparison {
    pub games: usize,
    pub avg_hltb_complete: f64,
    pub avg_ra_master: f64,
    /// How many times longer RA mastery takes on average.
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacklogSummary {
    pub total: usize,
    pub with_hltb: usize,
    pub with_ra_master: usize,
    pub quality: MatchQuality,
    pub total_mastery_hours: f64,
    pub average_mastery_hours: Option<f64>,
    pub total_points: u64,
    /// Most common systems, up to ten.
    pub systems: Vec<SystemCount>,
    pub longest: Vec<RankedTitle>,
    pub most_efficient: Vec<RankedTitle>,
    /// Titles with neither an HLTB beat time nor an RA mastery time.
    pub missing_time: Vec<String>,
    pub comparison: Option<TimeComparison>,
}

impl BacklogSummary {
    pub fn from_rows(rows: &[ExportRow], top_n: usize) -> Self {
        let mut quality = MatchQuality::default();
        for row in rows {
            match row.record.as_ref().map(|r| r.match_kind) {
                Some(MatchKind::Exact) => quality.exact += 1,
                Some(MatchKind::Fuzzy) => quality.fuzzy += 1,
                Some(MatchKind::Loose) => quality.loose += 1,
                Some(MatchKind::Poor) => quality.poor += 1,
                Some(MatchKind::NoMatch) => quality.none += 1,
                None => quality.unscanned += 1,
            }
        }

        let masters: Vec<f64> = rows.iter().filter_map(|r| r.ra_master).collect();
        let total_mastery_hours: f64 = masters.iter().sum();
        let average_mastery_hours =
            (!masters.is_empty()).then(|| total_mastery_hours / masters.len() as f64);

        let mut by_system: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for row in rows {
            let slot = by_system.entry(row.system.as_str()).or_default();
            slot.0 += 1;
            slot.1 += row.ra_master.unwrap_or(0.0);
        }
        let mut systems: Vec<SystemCount> = by_system
            .into_iter()
            .map(|(system, (games, mastery_hours))| SystemCount {
                system: system.to_string(),
                games,
                mastery_hours,
            })
            .collect();
        // BTreeMap order already breaks ties by name; the sort is stable
        systems.sort_by(|a, b| b.games.cmp(&a.games));
        systems.truncate(TOP_SYSTEMS);

        let longest = top_by(rows, top_n, |r| r.ra_master);
        let most_efficient = top_by(rows, top_n, |r| r.points_per_hour);

        let missing_time = rows
            .iter()
            .filter(|r| !r.has_time_data())
            .map(|r| r.title.clone())
            .collect();

        Self {
            total: rows.len(),
            with_hltb: rows.iter().filter(|r| r.hltb_beat.is_some()).count(),
            with_ra_master: masters.len(),
            quality,
            total_mastery_hours,
            average_mastery_hours,
            total_points: rows.iter().map(|r| u64::from(r.points)).sum(),
            systems,
            longest,
            most_efficient,
            missing_time,
            comparison: compare_times(rows),
        }
    }
}

fn top_by<F>(rows: &[ExportRow], n: usize, value: F) -> Vec<RankedTitle>
where
    F: Fn(&ExportRow) -> Option<f64>,
{
    let mut ranked: Vec<RankedTitle> = rows
        .iter()
        .filter_map(|r| {
            value(r).map(|v| RankedTitle {
                title: r.title.clone(),
                value: v,
            })
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.value
            .total_cmp(&a.value)
            .then_with(|| a.title.cmp(&b.title))
    });
    ranked.truncate(n);
    ranked
}

fn compare_times(rows: &[ExportRow]) -> Option<TimeComparison> {
    let pairs: Vec<(f64, f64)> = rows
        .iter()
        .filter_map(|r| Some((r.hltb_complete?, r.ra_master?)))
        .collect();
    if pairs.is_empty() {
        return None;
    }

    let n = pairs.len() as f64;
    let avg_hltb_complete = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let avg_ra_master = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let ratio = if avg_hltb_complete > 0.0 {
        avg_ra_master / avg_hltb_complete
    } else {
        0.0
    };

    Some(TimeComparison {
        games: pairs.len(),
        avg_hltb_complete,
        avg_ra_master,
        ratio,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// More than five years.
    PrioritizeByEfficiency,
    /// More than one year.
    MultiYear,
    Achievable,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::PrioritizeByEfficiency => {
                write!(f, "That's a lot of gaming! Maybe prioritize by efficiency?")
            }
            Verdict::MultiYear => write!(f, "A solid multi-year project!"),
            Verdict::Achievable => write!(f, "Very achievable!"),
        }
    }
}

/// How long the backlog takes at a given weekly pace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionEstimate {
    pub total_hours: f64,
    pub hours_per_week: f64,
    pub weeks: f64,
    pub months: f64,
    pub years: f64,
    pub completion_date: NaiveDate,
    pub verdict: Verdict,
}

impl CompletionEstimate {
    pub fn new(total_hours: f64, hours_per_week: f64, today: NaiveDate) -> AppResult<Self> {
        if !hours_per_week.is_finite() || hours_per_week <= 0.0 {
            return Err(AppError::Config(
                "Hours per week must be a positive number".to_string(),
            ));
        }
        if !total_hours.is_finite() || total_hours <= 0.0 {
            return Err(AppError::NotFound("No mastery time data available".to_string()));
        }

        let weeks = total_hours / hours_per_week;
        let years = weeks / WEEKS_PER_YEAR;
        let days = (weeks * 7.0).round() as i64;
        let completion_date = TimeDelta::try_days(days)
            .and_then(|delta| today.checked_add_signed(delta))
            .ok_or_else(|| AppError::Config("Completion date out of range".to_string()))?;

        let verdict = if years > 5.0 {
            Verdict::PrioritizeByEfficiency
        } else if years > 1.0 {
            Verdict::MultiYear
        } else {
            Verdict::Achievable
        };

        Ok(Self {
            total_hours,
            hours_per_week,
            weeks,
            months: weeks / WEEKS_PER_MONTH,
            years,
            completion_date,
            verdict,
        })
    }
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
