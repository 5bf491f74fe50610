use super::scan_cmds::resolve_credentials;
use super::AppContext;
use crate::services::backlog::{PlayerStats, PlayerStatsLookup, RaClient};
use crate::services::matcher::MatchKind;
use crate::services::reference::{HltbClient, ReferenceLookup};
use crate::services::scan::{ScanOptions, ScanPipeline, TitleLookup};
use crate::types::errors::AppResult;
use crate::types::hours::format_hours;

/// Title-only lookups have no RA game to ask about.
struct NoPlayerStats;

impl PlayerStatsLookup for NoPlayerStats {
    async fn player_stats(&self, _id: u64) -> PlayerStats {
        PlayerStats::default()
    }
}

fn print_reference(lookup: &TitleLookup, lookup_name: &str) {
    if let Some(error) = &lookup.error {
        println!("{lookup_name} search failed: {error}");
    }
    let Some(candidate) = lookup.result.candidate() else {
        println!("No {lookup_name} match found (searched: {})", lookup.searched.join(", "));
        return;
    };

    let comment = lookup.result.comment(lookup_name);
    if lookup.result.kind() == MatchKind::Exact || comment.is_empty() {
        println!("{lookup_name} match: {}", candidate.title);
    } else {
        println!("{lookup_name} match: {} ({comment})", candidate.title);
    }
    if let Some(record) = &lookup.record {
        println!("  Beat: {}", format_hours(record.beat_hours));
        println!("  Completionist: {}", format_hours(record.complete_hours));
    }
}

fn print_player_stats(stats: &PlayerStats) {
    if stats.is_empty() {
        println!("No RA player data");
        return;
    }
    println!("RA player data:");
    println!("  Median beat: {}", format_hours(stats.beat_hours));
    println!("  Median mastery: {}", format_hours(stats.master_hours));
    if stats.beat_hardcore_hours.is_some() || stats.master_hardcore_hours.is_some() {
        println!(
            "  Hardcore: beat {} / mastery {}",
            format_hours(stats.beat_hardcore_hours),
            format_hours(stats.master_hardcore_hours)
        );
    }
    if let Some(players) = stats.players {
        println!("  Distinct players: {players}");
    }
}

/// Numeric queries are RA game ids; anything else is a title searched on HLTB only.
pub async fn lookup(ctx: &AppContext, query: &str) -> AppResult<()> {
    let settings = &ctx.settings;
    let hltb = HltbClient::new(&settings.hltb_search_url)?;
    let options = ScanOptions::from(settings);
    let query = query.trim();

    if let Ok(id) = query.parse::<u64>() {
        let creds = resolve_credentials(&ctx.credential_store())?;
        let client = RaClient::new(&settings.ra_api_base, creds)?;
        let game = client.fetch_game(id).await?;
        println!("{} ({})", game.title, game.system);
        println!("  Achievements: {} | Points: {}", game.achievements, game.points);

        let pipeline = ScanPipeline::new(&hltb, &client, options);
        let (lookup, stats) = futures_util::join!(
            pipeline.lookup_title(&game.title),
            client.fetch_game_progression(id)
        );
        print_reference(&lookup, hltb.name());
        print_player_stats(&stats);
    } else {
        println!("Searching for: {query}");
        let pipeline = ScanPipeline::new(&hltb, &NoPlayerStats, options);
        let lookup = pipeline.lookup_title(query).await;
        print_reference(&lookup, hltb.name());
    }
    Ok(())
}
