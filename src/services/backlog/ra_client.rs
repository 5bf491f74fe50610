//! RetroAchievements Web API client.
//!
//! Want to Play list (paged), single game metadata, and game progression
//! (median beat/master times). Progression lookups are fail-soft.

use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::models::{
    BacklogEntry, GameInfo, GameProgression, PlayerStats, WantToPlayPage,
};
use super::PlayerStatsLookup;
use crate::services::config::credentials::Credentials;
use crate::types::errors::{AppError, AppResult};
use crate::types::hours::hours_from_seconds;

/// Entries requested per Want to Play page (API maximum).
pub const PAGE_SIZE: u64 = 500;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RaClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl RaClient {
    pub fn new(base_url: &str, credentials: Credentials) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("ra-backlog-timer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    fn endpoint(&self, method: &str, params: &[(&str, String)]) -> String {
        let mut url = format!(
            "{}/{}?y={}",
            self.base_url,
            method,
            urlencoding::encode(&self.credentials.api_key)
        );
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
            status if !status.is_success() => Err(AppError::Http(format!("HTTP {status}"))),
            _ => Ok(response.json::<T>().await?),
        }
    }

    /// Fetch every page of the user's Want to Play list.
    pub async fn fetch_want_to_play(&self) -> AppResult<Vec<BacklogEntry>> {
        info!(
            "Fetching Want to Play list for '{}'",
            self.credentials.username
        );

        let mut entries: Vec<BacklogEntry> = Vec::new();
        let mut offset = 0u64;

        loop {
            let url = self.endpoint(
                "API_GetUserWantToPlayList.php",
                &[
                    ("u", self.credentials.username.clone()),
                    ("c", PAGE_SIZE.to_string()),
                    ("o", offset.to_string()),
                ],
            );
            let page: WantToPlayPage = self.get_json(&url).await?;
            if page.results.is_empty() {
                break;
            }

            entries.extend(page.results.into_iter().map(BacklogEntry::from));
            debug!("Fetched {}/{} games", entries.len(), page.total);

            offset += PAGE_SIZE;
            if offset >= page.total {
                break;
            }
        }

        info!("Want to Play list: {} games", entries.len());
        Ok(entries)
    }

    /// Metadata for a single game id.
    pub async fn fetch_game(&self, id: u64) -> AppResult<BacklogEntry> {
        let url = self.endpoint("API_GetGame.php", &[("i", id.to_string())]);
        let info: GameInfo = self.get_json(&url).await?;

        let title = info
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::NotFound(format!("Game {id}")))?;

        Ok(BacklogEntry {
            id,
            title,
            system: info.console_name.unwrap_or_else(|| "Unknown".to_string()),
            achievements: info.achievements.unwrap_or(0),
            points: info.points.unwrap_or(0),
        })
    }

    /// Median completion times for a game. Empty stats on any failure.
    pub async fn fetch_game_progression(&self, id: u64) -> PlayerStats {
        let url = self.endpoint("API_GetGameProgression.php", &[("i", id.to_string())]);
        match self.get_json::<GameProgression>(&url).await {
            Ok(progression) => progression_to_stats(progression),
            Err(e) => {
                warn!("Progression lookup for game {id} failed: {e}");
                PlayerStats::default()
            }
        }
    }
}

impl PlayerStatsLookup for RaClient {
    async fn player_stats(&self, id: u64) -> PlayerStats {
        self.fetch_game_progression(id).await
    }
}

/// Seconds → hours (one decimal), dropping non-positive medians.
pub(crate) fn progression_to_stats(progression: GameProgression) -> PlayerStats {
    let hours = |secs: Option<f64>| secs.and_then(hours_from_seconds);
    PlayerStats {
        beat_hours: hours(progression.median_time_to_beat),
        master_hours: hours(progression.median_time_to_master),
        beat_hardcore_hours: hours(progression.median_time_to_beat_hardcore),
        master_hardcore_hours: hours(progression.median_time_to_master_hardcore),
        players: progression.num_distinct_players,
    }
}

#[cfg(test)]
#[path = "tests/ra_client_tests.rs"]
mod tests;
