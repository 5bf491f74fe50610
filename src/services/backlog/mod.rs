//! Backlog source: the user's RetroAchievements Want to Play list.
pub mod cache;
pub mod models;
pub mod ra_client;

pub use cache::BacklogCache;
pub use models::{BacklogEntry, PlayerStats, SystemFilter};
pub use ra_client::RaClient;

/// Player-statistics source keyed by backlog id. Never fails: missing data is an empty `PlayerStats`.
#[allow(async_fn_in_trait)]
pub trait PlayerStatsLookup {
    async fn player_stats(&self, id: u64) -> PlayerStats;
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod filter_tests;
