//! Static lab priority advice: improvement per upgrade hour for the next level of each lab.

use crate::logic::difficulty::round_to;
use crate::models::{StatsError, UserLabs, MAX_LAB_LEVEL};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabCategory {
    Damage,
    Health,
    Economy,
}

/// Which labs a player wants advice on.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabFocus {
    #[default]
    Damage,
    Health,
    Economy,
    All,
}

impl LabFocus {
    pub fn parse(name: Option<&str>) -> Result<Self, StatsError> {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("damage") => Ok(LabFocus::Damage),
            Some("health") => Ok(LabFocus::Health),
            Some("economy") => Ok(LabFocus::Economy),
            Some("all") => Ok(LabFocus::All),
            Some(other) => Err(StatsError::InvalidFocus(other.to_string())),
        }
    }

    fn includes(self, category: LabCategory) -> bool {
        match self {
            LabFocus::All => true,
            LabFocus::Damage => category == LabCategory::Damage,
            LabFocus::Health => category == LabCategory::Health,
            LabFocus::Economy => category == LabCategory::Economy,
        }
    }
}

/// One row of the lab table.
#[derive(Clone, Copy, Debug)]
pub struct LabSpec {
    pub key: &'static str,
    pub display_name: &'static str,
    pub category: LabCategory,
    /// Stat growth per level, in percent.
    pub growth_percent: f64,
    pub upgrade_hours: f64,
}

const fn lab(
    key: &'static str,
    display_name: &'static str,
    category: LabCategory,
    growth_percent: f64,
    upgrade_hours: f64,
) -> LabSpec {
    LabSpec {
        key,
        display_name,
        category,
        growth_percent,
        upgrade_hours,
    }
}

pub const LABS: &[LabSpec] = &[
    lab("damage", "Damage", LabCategory::Damage, 12.4, 10.0),
    lab("attack-speed", "Attack Speed", LabCategory::Damage, 12.4, 10.0),
    lab("critical-factor", "Critical Factor", LabCategory::Damage, 12.4, 10.0),
    lab("range", "Range", LabCategory::Damage, 12.4, 10.0),
    lab("super-crit-chance", "Super Crit Chance", LabCategory::Damage, 8.6, 10.0),
    lab("super-crit-multi", "Super Crit Multi", LabCategory::Damage, 12.4, 10.0),
    lab("super-tower-bonus", "Super Tower Bonus", LabCategory::Damage, 33.8, 20.0),
    lab("health", "Health", LabCategory::Health, 12.4, 10.0),
    lab("health-regen", "Health Regen", LabCategory::Health, 12.4, 10.0),
    lab("defense-absolute", "Defense Absolute", LabCategory::Health, 12.4, 10.0),
    lab("defense-percent", "Defense Percent", LabCategory::Health, 12.4, 10.0),
    lab("cash-bonus", "Cash Bonus", LabCategory::Economy, 12.4, 10.0),
    lab("cash-per-wave", "Cash Per Wave", LabCategory::Economy, 12.4, 10.0),
    lab("coins-per-kill-bonus", "Coins Per Kill Bonus", LabCategory::Economy, 12.4, 10.0),
    lab("coins-per-wave", "Coins Per Wave", LabCategory::Economy, 12.4, 10.0),
    lab("interest", "Interest", LabCategory::Economy, 12.4, 10.0),
    lab("golden-tower-bonus", "Golden Tower Bonus", LabCategory::Economy, 12.4, 10.0),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabAdvice {
    pub lab_name: String,
    pub display_name: String,
    pub category: LabCategory,
    pub current_level: u32,
    pub next_level: u32,
    pub improvement_percent: f64,
    pub upgrade_time_hours: f64,
    /// Improvement percent per upgrade hour.
    pub roi: f64,
}

/// Next-level advice for each unmaxed lab in the focus, best ROI first.
pub fn lab_priorities(labs: &UserLabs, focus: LabFocus) -> Vec<LabAdvice> {
    let mut advice: Vec<LabAdvice> = LABS
        .iter()
        .filter(|entry| focus.includes(entry.category) && labs.level(entry.key) < MAX_LAB_LEVEL)
        .map(|entry| {
            let current_level = labs.level(entry.key);
            LabAdvice {
                lab_name: entry.key.to_string(),
                display_name: entry.display_name.to_string(),
                category: entry.category,
                current_level,
                next_level: current_level + 1,
                improvement_percent: entry.growth_percent,
                upgrade_time_hours: entry.upgrade_hours,
                roi: round_to(entry.growth_percent / entry.upgrade_hours, 2),
            }
        })
        .collect();
    advice.sort_by(|a, b| b.roi.total_cmp(&a.roi));
    advice
}
