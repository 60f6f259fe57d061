//! UserLabs: a player's saved lab levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest level accepted for any lab.
pub const MAX_LAB_LEVEL: u32 = 999;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserLabs {
    pub discord_id: String,
    /// Lab key (e.g. `attack-speed`) -> level.
    pub labs: BTreeMap<String, u32>,
    pub tier: u32,
    pub wave: u32,
    pub updated_at: DateTime<Utc>,
}

impl UserLabs {
    /// Levels above `MAX_LAB_LEVEL` are clamped; tier/wave default to 1.
    pub fn new(
        discord_id: impl Into<String>,
        labs: BTreeMap<String, u32>,
        tier: Option<u32>,
        wave: Option<u32>,
    ) -> Self {
        let labs = labs
            .into_iter()
            .map(|(k, v)| (k, v.min(MAX_LAB_LEVEL)))
            .collect();
        Self {
            discord_id: discord_id.into(),
            labs,
            tier: tier.unwrap_or(1),
            wave: wave.unwrap_or(1),
            updated_at: Utc::now(),
        }
    }

    pub fn level(&self, key: &str) -> u32 {
        self.labs.get(key).copied().unwrap_or(0)
    }
}
