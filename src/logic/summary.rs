//! Dashboard analytics: run summary, progress series, tier distribution.

use crate::logic::rates::calculate_totals;
use crate::models::{Run, StatsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub total_runs: usize,
    pub max_tier: u32,
    pub max_wave: u32,
    pub avg_tier: f64,
    pub avg_wave: f64,
    pub total_enemies_killed: f64,
    pub max_damage: f64,
    pub total_damage_dealt: f64,
    pub first_run: Option<DateTime<Utc>>,
    pub last_run: Option<DateTime<Utc>>,
    pub total_cannon_shards: f64,
    pub total_armor_shards: f64,
    pub total_generator_shards: f64,
    pub total_core_shards: f64,
    pub total_common_modules: f64,
    pub total_rare_modules: f64,
    pub total_gems_earned: f64,
    pub total_medals_earned: f64,
    pub total_reroll_shards: f64,
    pub total_coins: f64,
    pub total_play_time_hours: f64,
    pub coins_per_hour: f64,
}

pub fn stats_summary(runs: &[Run]) -> StatsSummary {
    if runs.is_empty() {
        return StatsSummary::default();
    }
    let n = runs.len() as f64;
    let totals = calculate_totals(runs);
    let sum = |key: &str| runs.iter().map(|r| r.number(key)).sum::<f64>();

    StatsSummary {
        total_runs: runs.len(),
        max_tier: runs.iter().map(|r| r.tier).max().unwrap_or(0),
        max_wave: runs.iter().map(|r| r.wave).max().unwrap_or(0),
        avg_tier: runs.iter().map(|r| r.tier as f64).sum::<f64>() / n,
        avg_wave: runs.iter().map(|r| r.wave as f64).sum::<f64>() / n,
        total_enemies_killed: sum("total_enemies"),
        max_damage: runs
            .iter()
            .map(|r| r.number("damage_dealt"))
            .fold(0.0, f64::max),
        total_damage_dealt: sum("damage_dealt"),
        first_run: runs.iter().map(|r| r.submitted_at).min(),
        last_run: runs.iter().map(|r| r.submitted_at).max(),
        total_cannon_shards: totals.total_cannon_shards,
        total_armor_shards: totals.total_armor_shards,
        total_generator_shards: totals.total_generator_shards,
        total_core_shards: totals.total_core_shards,
        total_common_modules: totals.total_common_modules,
        total_rare_modules: totals.total_rare_modules,
        total_gems_earned: totals.total_gems,
        total_medals_earned: totals.total_medals,
        total_reroll_shards: totals.total_reroll_shards,
        total_coins: totals.total_coins,
        total_play_time_hours: totals.total_real_time,
        coins_per_hour: if totals.total_real_time > 0.0 {
            totals.total_coins / totals.total_real_time
        } else {
            0.0
        },
    }
}

/// Which stat a progress chart tracks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressMetric {
    #[default]
    Tier,
    Wave,
    DamageDealt,
    CoinsEarned,
    CellsEarned,
    TotalEnemies,
    GemsEarned,
    MedalsEarned,
    DamageTaken,
}

impl ProgressMetric {
    pub const NAMES: [&'static str; 9] = [
        "tier",
        "wave",
        "damage_dealt",
        "coins_earned",
        "cells_earned",
        "total_enemies",
        "gems_earned",
        "medals_earned",
        "damage_taken",
    ];

    const ALL: [ProgressMetric; 9] = [
        ProgressMetric::Tier,
        ProgressMetric::Wave,
        ProgressMetric::DamageDealt,
        ProgressMetric::CoinsEarned,
        ProgressMetric::CellsEarned,
        ProgressMetric::TotalEnemies,
        ProgressMetric::GemsEarned,
        ProgressMetric::MedalsEarned,
        ProgressMetric::DamageTaken,
    ];

    /// Column key this metric reads.
    pub fn key(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Empty / missing defaults to `tier`.
    pub fn parse(name: Option<&str>) -> Result<Self, StatsError> {
        let name = match name.map(str::trim) {
            None | Some("") => return Ok(ProgressMetric::Tier),
            Some(n) => n,
        };
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| StatsError::InvalidMetric(name.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub tier: u32,
    pub wave: u32,
}

/// One point per run, oldest first.
pub fn progress(runs: &[Run], metric: ProgressMetric) -> Vec<ProgressPoint> {
    let mut ordered: Vec<&Run> = runs.iter().collect();
    ordered.sort_by_key(|r| r.submitted_at);
    ordered
        .into_iter()
        .map(|r| ProgressPoint {
            timestamp: r.submitted_at,
            value: r.number(metric.key()),
            tier: r.tier,
            wave: r.wave,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: u32,
    pub count: usize,
}

pub fn tier_distribution(runs: &[Run]) -> Vec<TierCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in runs {
        *counts.entry(r.tier).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(tier, count)| TierCount { tier, count })
        .collect()
}
