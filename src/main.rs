use clap::Parser;
use ra_backlog_lib::commands::{dispatch, Cli};
use ra_backlog_lib::types::errors::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match dispatch(cli).await {
        Err(AppError::Cancelled) => {
            println!("Cancelled.");
            Ok(())
        }
        other => Ok(other?),
    }
}
