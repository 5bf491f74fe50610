use chrono::Local;
use std::path::PathBuf;

use super::AppContext;
use crate::services::backlog::BacklogCache;
use crate::services::export::{build_rows, write_rows, ExportRow};
use crate::services::progress::{JsonProgressStore, ProgressStore};
use crate::services::scan::{BacklogSummary, CompletionEstimate};
use crate::types::errors::{AppError, AppResult};

pub const SUMMARY_TOP: usize = 5;

/// Rows for the cached backlog joined with saved progress.
pub fn load_rows(ctx: &AppContext) -> AppResult<Vec<ExportRow>> {
    let cache = BacklogCache::new(&ctx.settings.backlog_cache_path);
    let entries = cache.load_any().ok_or_else(|| {
        AppError::NotFound(format!(
            "No backlog data at {}. Run a scan first.",
            cache.path().display()
        ))
    })?;
    let store = JsonProgressStore::open(&ctx.settings.progress_path)?;
    Ok(build_rows(&entries, |id| store.get(id).cloned()))
}

pub fn print_summary(summary: &BacklogSummary) {
    println!("Total games: {}", summary.total);
    println!("Games with RA mastery data: {}", summary.with_ra_master);
    println!("Games with HLTB data: {}", summary.with_hltb);

    let q = &summary.quality;
    println!(
        "Match quality: {} exact, {} fuzzy, {} loose, {} poor, {} none, {} not scanned",
        q.exact, q.fuzzy, q.loose, q.poor, q.none, q.unscanned
    );

    if let Some(average) = summary.average_mastery_hours {
        println!("\nRA mastery time:");
        println!(
            "  Total: {:.1} hours ({:.1} days)",
            summary.total_mastery_hours,
            summary.total_mastery_hours / 24.0
        );
        println!("  Average: {average:.1} hours per game");
    }
    println!("\nTotal points available: {}", summary.total_points);

    if !summary.systems.is_empty() {
        println!("\nGames by system:");
        for system in &summary.systems {
            if system.mastery_hours > 0.0 {
                println!(
                    "  {}: {} games ({:.1}h)",
                    system.system, system.games, system.mastery_hours
                );
            } else {
                println!("  {}: {} games", system.system, system.games);
            }
        }
    }

    if !summary.longest.is_empty() {
        println!("\nLongest games (by RA mastery):");
        for ranked in &summary.longest {
            println!("  {:.1}h - {}", ranked.value, ranked.title);
        }
    }
    if !summary.most_efficient.is_empty() {
        println!("\nMost efficient (points per hour):");
        for ranked in &summary.most_efficient {
            println!("  {:.1} pts/hr - {}", ranked.value, ranked.title);
        }
    }

    if let Some(cmp) = &summary.comparison {
        println!("\nRA mastery vs HLTB completionist ({} games):", cmp.games);
        println!("  Avg HLTB completionist: {:.1} hours", cmp.avg_hltb_complete);
        println!("  Avg RA mastery: {:.1} hours", cmp.avg_ra_master);
        if cmp.ratio > 0.0 {
            println!("  RA mastery takes {:.1}x as long", cmp.ratio);
        }
    }

    if !summary.missing_time.is_empty() {
        println!("\n{} games without time data", summary.missing_time.len());
    }
}

pub fn summary(ctx: &AppContext) -> AppResult<()> {
    let rows = load_rows(ctx)?;
    print_summary(&BacklogSummary::from_rows(&rows, SUMMARY_TOP));
    Ok(())
}

pub fn estimate(ctx: &AppContext, hours_per_week: f64) -> AppResult<()> {
    let rows = load_rows(ctx)?;
    let summary = BacklogSummary::from_rows(&rows, 0);
    let estimate = CompletionEstimate::new(
        summary.total_mastery_hours,
        hours_per_week,
        Local::now().date_naive(),
    )?;

    println!(
        "Total backlog: {:.1} hours ({} games)",
        estimate.total_hours, summary.total
    );
    println!("At {} hours per week:", estimate.hours_per_week);
    println!("  Weeks to complete: {:.1}", estimate.weeks);
    println!("  Months to complete: {:.1}", estimate.months);
    println!("  Years to complete: {:.2}", estimate.years);
    println!(
        "  Estimated completion: {}",
        estimate.completion_date.format("%B %Y")
    );
    println!("\n{}", estimate.verdict);
    Ok(())
}

/// `<output>.csv` next to the configured output file.
pub fn csv_path(ctx: &AppContext) -> PathBuf {
    ctx.output_path.with_extension("csv")
}

pub fn export_csv(ctx: &AppContext) -> AppResult<()> {
    let rows = load_rows(ctx)?;
    let path = csv_path(ctx);
    write_rows(&path, &rows)?;
    println!("Exported to {}", path.display());
    Ok(())
}
