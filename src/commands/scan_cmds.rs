use log::info;

use super::prompt::{confirm, prompt_credentials};
use super::report_cmds::{print_summary, SUMMARY_TOP};
use super::{AppContext, ScanArgs};
use crate::services::backlog::{BacklogCache, BacklogEntry, RaClient, SystemFilter};
use crate::services::config::{CredentialStore, Credentials};
use crate::services::export::{build_rows, write_rows};
use crate::services::fs_utils::remove_if_exists;
use crate::services::matcher::MatchKind;
use crate::services::progress::{JsonProgressStore, ProgressRecord, ProgressStore};
use crate::services::reference::HltbClient;
use crate::services::scan::{BacklogSummary, ScanOptions, ScanPipeline};
use crate::types::errors::{AppError, AppResult};
use crate::types::hours::format_hours;

/// Stored credentials, or ask for new ones and store them.
pub fn resolve_credentials(store: &CredentialStore) -> AppResult<Credentials> {
    if let Some((creds, source)) = store.load() {
        println!("Using credentials for {} ({source})", creds.username);
        return Ok(creds);
    }

    println!("No stored credentials found.");
    let creds = prompt_credentials("")?;
    let source = store.save(&creds)?;
    println!("Credentials saved to {source}");
    Ok(creds)
}

/// Delete saved progress and the cached backlog.
fn discard_previous(ctx: &AppContext) -> AppResult<()> {
    for path in [&ctx.settings.progress_path, &ctx.settings.backlog_cache_path] {
        if remove_if_exists(path)? {
            info!("Removed {}", path.display());
        }
    }
    Ok(())
}

async fn load_backlog(
    client: &RaClient,
    cache: &BacklogCache,
    refresh: bool,
) -> AppResult<Vec<BacklogEntry>> {
    if !refresh {
        if let Some(games) = cache.load(client.username()) {
            println!(
                "Using cached Want to Play list ({} games, --refresh to re-fetch)",
                games.len()
            );
            return Ok(games);
        }
    }

    println!("Fetching Want to Play list for '{}'...", client.username());
    let games = client.fetch_want_to_play().await?;
    cache.save(client.username(), &games)?;
    println!("{} games in Want to Play list", games.len());
    Ok(games)
}

fn entry_line(entry: &BacklogEntry, record: &ProgressRecord) -> String {
    let matched = match (&record.matched_title, record.match_kind) {
        (Some(title), MatchKind::Exact) => title.clone(),
        (Some(title), kind) => format!("{title} [{kind} {:.0}%]", record.match_score * 100.0),
        (None, _) if !record.comment.is_empty() => record.comment.clone(),
        (None, _) => "no HLTB match".to_string(),
    };
    format!(
        "{} ({}): {} | beat {} | RA master {}",
        entry.title,
        entry.system,
        matched,
        format_hours(record.beat_hours),
        format_hours(record.ra_master_hours),
    )
}

pub async fn run_scan(ctx: &AppContext, args: &ScanArgs) -> AppResult<()> {
    let settings = &ctx.settings;

    if args.fresh {
        if !args.yes && !confirm("Discard saved progress and start over?")? {
            return Err(AppError::Cancelled);
        }
        discard_previous(ctx)?;
    }

    let credentials = ctx.credential_store();
    if args.reset_creds {
        credentials.clear()?;
        println!("Credentials cleared.");
    }
    let creds = resolve_credentials(&credentials)?;

    let client = RaClient::new(&settings.ra_api_base, creds)?;
    let cache = BacklogCache::new(&settings.backlog_cache_path);
    let entries = match load_backlog(&client, &cache, args.refresh).await {
        Err(AppError::Unauthorized) => {
            eprintln!("Invalid API key or unauthorized. Use --reset-creds to re-enter your credentials.");
            return Err(AppError::Unauthorized);
        }
        other => other?,
    };
    if entries.is_empty() {
        println!("No games found in Want to Play list. Make sure the list is accessible.");
        return Ok(());
    }

    let filter = SystemFilter {
        include: args.systems.clone(),
        exclude: args.exclude_systems.clone(),
    };
    let entries = filter.apply(entries);
    if entries.is_empty() {
        println!("No games to process after filtering.");
        return Ok(());
    }

    let mut store = JsonProgressStore::open(&settings.progress_path)?;
    let hltb = HltbClient::new(&settings.hltb_search_url)?;
    let pipeline = ScanPipeline::new(&hltb, &client, ScanOptions::from(settings));

    let mut done = 0usize;
    let stats = pipeline
        .run(&entries, &mut store, |entry, record| {
            done += 1;
            println!("[{done}] {}", entry_line(entry, record));
        })
        .await?;

    let rows = build_rows(&entries, |id| store.get(id).cloned());
    write_rows(&ctx.output_path, &rows)?;

    println!();
    println!(
        "Scan complete: {} games, {} from saved progress, {} fetched, {} without an HLTB match",
        stats.total, stats.from_cache, stats.fetched, stats.unmatched
    );
    if stats.failed > 0 {
        println!(
            "{} games failed to look up and will be retried on the next scan",
            stats.failed
        );
    }
    println!("Results written to {}", ctx.output_path.display());
    print_summary(&BacklogSummary::from_rows(&rows, SUMMARY_TOP));
    Ok(())
}

#[cfg(test)]
#[path = "tests/scan_cmds_tests.rs"]
mod tests;
