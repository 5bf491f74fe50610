use serde::{Deserialize, Serialize};

/// One game on the user's Want to Play list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogEntry {
    /// RetroAchievements game id.
    pub id: u64,
    /// Raw catalog title, decorations included.
    pub title: String,
    pub system: String,
    pub achievements: u32,
    pub points: u32,
}

/// Player-derived time estimates for one game, in hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub beat_hours: Option<f64>,
    pub master_hours: Option<f64>,
    pub beat_hardcore_hours: Option<f64>,
    pub master_hardcore_hours: Option<f64>,
    pub players: Option<u64>,
}

impl PlayerStats {
    pub fn is_empty(&self) -> bool {
        self == &PlayerStats::default()
    }
}

/// Include/exclude filter on the system name.
#[derive(Debug, Clone, Default)]
pub struct SystemFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl SystemFilter {
    pub fn accepts(&self, entry: &BacklogEntry) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|s| s == &entry.system);
        included && !self.exclude.iter().any(|s| s == &entry.system)
    }

    pub fn apply(&self, entries: Vec<BacklogEntry>) -> Vec<BacklogEntry> {
        entries.into_iter().filter(|e| self.accepts(e)).collect()
    }
}

// ── RetroAchievements wire shapes ─────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct WantToPlayPage {
    #[serde(rename = "Total", default)]
    pub total: u64,
    #[serde(rename = "Results", default)]
    pub results: Vec<WantToPlayGame>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WantToPlayGame {
    #[serde(rename = "ID")]
    pub id: u64,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "ConsoleName", default)]
    pub console_name: String,
    #[serde(rename = "AchievementsPublished", default)]
    pub achievements_published: Option<u32>,
    #[serde(rename = "PointsTotal", default)]
    pub points_total: Option<u32>,
}

impl From<WantToPlayGame> for BacklogEntry {
    fn from(game: WantToPlayGame) -> Self {
        Self {
            id: game.id,
            title: game.title,
            system: game.console_name,
            achievements: game.achievements_published.unwrap_or(0),
            points: game.points_total.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GameInfo {
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "ConsoleName", default)]
    pub console_name: Option<String>,
    #[serde(rename = "NumAchievements", alias = "achievements_published", default)]
    pub achievements: Option<u32>,
    #[serde(rename = "Points", alias = "points_total", default)]
    pub points: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GameProgression {
    #[serde(rename = "MedianTimeToBeat", default)]
    pub median_time_to_beat: Option<f64>,
    #[serde(rename = "MedianTimeToMaster", default)]
    pub median_time_to_master: Option<f64>,
    #[serde(rename = "MedianTimeToBeatHardcore", default)]
    pub median_time_to_beat_hardcore: Option<f64>,
    #[serde(rename = "MedianTimeToMasterHardcore", default)]
    pub median_time_to_master_hardcore: Option<f64>,
    #[serde(rename = "NumDistinctPlayers", default)]
    pub num_distinct_players: Option<u64>,
}
