//! HowLongToBeat search client.
//!
//! POSTs a search payload with DLC hidden and converts the `comp_*` second
//! counts into hours. The endpoint is configurable since the site moves it.

use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::{ReferenceLookup, ReferenceRecord};
use crate::types::errors::{AppError, AppResult};
use crate::types::hours::hours_from_seconds;

pub const DEFAULT_SEARCH_URL: &str = "https://howlongtobeat.com/api/search";

const BASE_URL: &str = "https://howlongtobeat.com";
const PAGE_SIZE: u32 = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    game_id: u64,
    game_name: String,
    #[serde(default)]
    comp_main: f64,
    #[serde(default)]
    comp_plus: f64,
    #[serde(default)]
    comp_100: f64,
}

impl From<SearchHit> for ReferenceRecord {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.game_id.to_string(),
            title: hit.game_name,
            beat_hours: hours_from_seconds(hit.comp_main).or_else(|| hours_from_seconds(hit.comp_plus)),
            complete_hours: hours_from_seconds(hit.comp_100),
        }
    }
}

pub struct HltbClient {
    client: Client,
    search_url: String,
}

impl HltbClient {
    pub fn new(search_url: &str) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ORIGIN, HeaderValue::from_static(BASE_URL));
        headers.insert(REFERER, HeaderValue::from_static("https://howlongtobeat.com/"));

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            search_url: search_url.to_string(),
        })
    }

    fn payload(term: &str) -> serde_json::Value {
        serde_json::json!({
            "searchType": "games",
            "searchTerms": term.split_whitespace().collect::<Vec<_>>(),
            "searchPage": 1,
            "size": PAGE_SIZE,
            "searchOptions": {
                "games": {
                    "userId": 0,
                    "platform": "",
                    "sortCategory": "popular",
                    "rangeCategory": "main",
                    "rangeTime": { "min": null, "max": null },
                    "gameplay": { "perspective": "", "flow": "", "genre": "", "difficulty": "" },
                    "rangeYear": { "min": "", "max": "" },
                    "modifier": "hide_dlc"
                },
                "users": { "sortCategory": "postcount" },
                "lists": { "sortCategory": "follows" },
                "filter": "",
                "sort": 0,
                "randomizer": 0
            },
            "useCache": true
        })
    }
}

impl ReferenceLookup for HltbClient {
    fn name(&self) -> &str {
        "HLTB"
    }

    async fn search(&self, term: &str) -> AppResult<Vec<ReferenceRecord>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(&self.search_url)
            .json(&Self::payload(term))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::Http(format!(
                "HLTB search endpoint not found ({}); update hltb_search_url",
                self.search_url
            ))),
            status if !status.is_success() => Err(AppError::Http(format!("HTTP {status}"))),
            _ => {
                let body: SearchResponse = response.json().await?;
                debug!("HLTB '{}': {} results", term, body.data.len());
                Ok(parse_hits(body))
            }
        }
    }
}

fn parse_hits(body: SearchResponse) -> Vec<ReferenceRecord> {
    body.data.into_iter().map(ReferenceRecord::from).collect()
}

#[cfg(test)]
#[path = "tests/hltb_client_tests.rs"]
mod tests;
