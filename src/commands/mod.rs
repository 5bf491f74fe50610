//! Command-line surface. Each subcommand maps to one handler module.
pub mod account_cmds;
pub mod lookup_cmds;
pub mod match_cmds;
pub mod prompt;
pub mod report_cmds;
pub mod scan_cmds;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::services::config::{AppSettings, ConfigService, CredentialStore};
use crate::types::errors::AppResult;

#[derive(Parser, Debug)]
#[command(name = "ra-backlog-timer", version)]
#[command(about = "Estimate how long your RetroAchievements backlog takes to beat and master")]
pub struct Cli {
    /// Settings file (defaults to the user config directory).
    #[arg(long, env = "RA_BACKLOG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Results file; `.xlsx` or `.csv`.
    #[arg(long, short = 'o', global = true)]
    pub output: Option<PathBuf>,

    /// Debug logging.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the Want to Play list and look up times for new entries.
    Scan(ScanArgs),
    /// Look up one game by RetroAchievements id or by title.
    Lookup {
        /// Numeric RA game id, or a title searched on HowLongToBeat.
        query: String,
    },
    /// Resolve a title against candidate titles offline and show the scores.
    Match {
        title: String,
        #[arg(long = "candidate", short = 'c', required = true)]
        candidates: Vec<String>,
    },
    /// Statistics over the last scan.
    Summary,
    /// Estimate when the backlog is mastered at a weekly pace.
    Estimate {
        #[arg(long)]
        hours_per_week: f64,
    },
    /// Write the last scan results as CSV next to the output file.
    ExportCsv,
    /// Stored RetroAchievements credentials.
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ScanArgs {
    /// Discard saved progress and the cached backlog first.
    #[arg(long)]
    pub fresh: bool,
    /// Skip the confirmation for --fresh.
    #[arg(long, short = 'y')]
    pub yes: bool,
    /// Re-fetch the Want to Play list instead of using the cache.
    #[arg(long)]
    pub refresh: bool,
    /// Forget stored credentials and ask again.
    #[arg(long)]
    pub reset_creds: bool,
    /// Only scan these systems (exact name, repeatable).
    #[arg(long = "system", value_name = "NAME")]
    pub systems: Vec<String>,
    /// Skip these systems (exact name, repeatable).
    #[arg(long = "exclude-system", value_name = "NAME")]
    pub exclude_systems: Vec<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Show,
    Clear,
}

/// Resolved settings shared by every handler.
pub struct AppContext {
    pub config: ConfigService,
    pub settings: AppSettings,
    pub output_path: PathBuf,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> AppResult<Self> {
        let path = cli.config.clone().unwrap_or_else(ConfigService::default_path);
        let config = ConfigService::load(path)?;
        let settings = config.get_settings();
        let output_path = cli
            .output
            .clone()
            .unwrap_or_else(|| settings.output_path.clone());
        log::debug!("Settings from {}", config.path().display());

        Ok(Self {
            config,
            settings,
            output_path,
        })
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(&self.settings.credentials_path)
    }
}

pub async fn dispatch(cli: Cli) -> AppResult<()> {
    let ctx = AppContext::from_cli(&cli)?;
    match cli.command {
        Command::Scan(args) => scan_cmds::run_scan(&ctx, &args).await,
        Command::Lookup { query } => lookup_cmds::lookup(&ctx, &query).await,
        Command::Match { title, candidates } => {
            match_cmds::match_title(&ctx, &title, &candidates);
            Ok(())
        }
        Command::Summary => report_cmds::summary(&ctx),
        Command::Estimate { hours_per_week } => report_cmds::estimate(&ctx, hours_per_week),
        Command::ExportCsv => report_cmds::export_csv(&ctx),
        Command::Account { action } => account_cmds::account(&ctx, action),
    }
}

#[cfg(test)]
#[path = "tests/cli_tests.rs"]
mod tests;
