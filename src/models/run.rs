//! Run, StatValue, RunCategory, and TournamentResult.

use crate::models::error::StatsError;
use crate::parse::{parse_game_time, parse_number_or_zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Unique identifier for a submitted run.
pub type RunId = Uuid;

/// One value from a battle report: numbers are decoded, everything else stays as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    /// Numeric view; text goes through the suffix-aware parser (0 if it isn't a number).
    pub fn as_number(&self) -> f64 {
        match self {
            StatValue::Number(n) => *n,
            StatValue::Text(s) => parse_number_or_zero(s),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            StatValue::Number(_) => None,
        }
    }
}

/// Column key -> value, as parsed from a battle report.
pub type RunStats = BTreeMap<String, StatValue>;

/// What kind of run the player marked this as.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunCategory {
    Milestone,
    Tournament,
    Farm,
}

impl RunCategory {
    /// Empty string clears the category; anything unknown is rejected.
    pub fn parse(s: &str) -> Result<Option<Self>, StatsError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "milestone" => Ok(Some(RunCategory::Milestone)),
            "tournament" => Ok(Some(RunCategory::Tournament)),
            "farm" => Ok(Some(RunCategory::Farm)),
            other => Err(StatsError::InvalidCategory(other.to_string())),
        }
    }
}

/// A single completed game session submitted by a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub id: RunId,
    /// Owner; None for anonymous uploads.
    pub discord_user_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub category: Option<RunCategory>,
    /// Free-form grouping label chosen by the player.
    pub session_name: Option<String>,
    pub tier: u32,
    pub wave: u32,
    /// Everything else from the report, keyed by column name.
    pub stats: RunStats,
}

impl Run {
    /// Build a run from parsed stats; `tier` and `wave` are lifted out of the map.
    pub fn new(discord_user_id: Option<String>, tier: u32, wave: u32, stats: RunStats) -> Self {
        Self {
            id: Uuid::new_v4(),
            discord_user_id,
            submitted_at: Utc::now(),
            category: None,
            session_name: None,
            tier,
            wave,
            stats,
        }
    }

    /// Numeric value of a stat (0 when absent or not a number).
    pub fn number(&self, key: &str) -> f64 {
        match key {
            "tier" => self.tier as f64,
            "wave" => self.wave as f64,
            _ => self.stats.get(key).map(StatValue::as_number).unwrap_or(0.0),
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.stats.get(key).and_then(StatValue::as_text)
    }

    /// Time stat (`game_time` / `real_time`) in hours; 0 when absent or unparseable.
    pub fn hours(&self, key: &str) -> f64 {
        self.text(key)
            .and_then(parse_game_time)
            .map(|d| d.hours())
            .unwrap_or(0.0)
    }

    /// Whether this run belongs to the given user.
    pub fn is_owned_by(&self, user: &str) -> bool {
        self.discord_user_id.as_deref() == Some(user)
    }
}

/// One row of a tournament-results import.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub date: String,
    pub name: String,
    pub rank: u32,
    pub score: u64,
    pub tier: u32,
    pub wave: u32,
    #[serde(default)]
    pub rewards: String,
}
