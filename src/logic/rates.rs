//! Resource totals and per-hour / per-wave rates over a set of runs.

use crate::models::Run;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    pub total_coins: f64,
    pub total_cells: f64,
    pub total_reroll_shards: f64,
    pub total_cannon_shards: f64,
    pub total_armor_shards: f64,
    pub total_generator_shards: f64,
    pub total_core_shards: f64,
    pub total_common_modules: f64,
    pub total_rare_modules: f64,
    pub total_gems: f64,
    pub total_medals: f64,
    pub total_coins_fetched: f64,
    /// Hours.
    pub total_game_time: f64,
    /// Hours.
    pub total_real_time: f64,
    pub total_waves: f64,
    pub total_damage_taken: f64,
    pub total_damage_taken_wall: f64,
    pub total_damage_taken_berserked: f64,
    pub total_coins_from_golden_tower: f64,
    pub total_coins_from_blackhole: f64,
    pub total_coins_from_death_wave: f64,
    pub total_coins_from_spotlight: f64,
    pub total_coins_from_orbs: f64,
    pub total_coins_from_coin_upgrade: f64,
    pub total_coins_from_coin_bonuses: f64,
    pub total_cash_from_golden_tower: f64,
    pub total_golden_bot_coins_earned: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunRates {
    pub coins_per_hour: f64,
    pub coins_per_wave: f64,
    pub cells_per_hour: f64,
    pub cells_per_wave: f64,
    pub reroll_shards_per_hour: f64,
    pub shards_per_wave: f64,
    pub gems_per_hour: f64,
    pub waves_per_hour: f64,
}

pub fn calculate_totals(runs: &[Run]) -> RunTotals {
    let mut t = RunTotals::default();
    for run in runs {
        t.total_coins += run.number("coins_earned");
        t.total_cells += run.number("cells_earned");
        t.total_reroll_shards += run.number("reroll_shards_earned_total");
        t.total_cannon_shards += run.number("cannon_shards");
        t.total_armor_shards += run.number("armor_shards");
        t.total_generator_shards += run.number("generator_shards");
        t.total_core_shards += run.number("core_shards");
        t.total_common_modules += run.number("common_modules");
        t.total_rare_modules += run.number("rare_modules");
        t.total_gems += run.number("gems_earned");
        t.total_medals += run.number("medals_earned");
        t.total_coins_fetched += run.number("coins_fetched");
        t.total_waves += run.wave as f64;

        t.total_damage_taken += run.number("damage_taken");
        t.total_damage_taken_wall += run.number("damage_taken_wall");
        t.total_damage_taken_berserked += run.number("damage_taken_berserked");

        t.total_coins_from_golden_tower += run.number("coins_from_golden_tower");
        t.total_coins_from_blackhole += run.number("coins_from_blackhole");
        t.total_coins_from_death_wave += run.number("coins_from_death_wave");
        t.total_coins_from_spotlight += run.number("coins_from_spotlight");
        t.total_coins_from_orbs += run.number("coins_from_orbs");
        t.total_coins_from_coin_upgrade += run.number("coins_from_coin_upgrade");
        t.total_coins_from_coin_bonuses += run.number("coins_from_coin_bonuses");
        t.total_cash_from_golden_tower += run.number("cash_from_golden_tower");
        t.total_golden_bot_coins_earned += run.number("golden_bot_coins_earned");

        t.total_game_time += run.hours("game_time");
        t.total_real_time += run.hours("real_time");
    }
    t
}

fn per(amount: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        amount / denominator
    } else {
        0.0
    }
}

/// Hourly rates use real time (actual play time without pauses).
pub fn calculate_rates(totals: &RunTotals) -> RunRates {
    let hours = totals.total_real_time;
    let waves = totals.total_waves;
    RunRates {
        coins_per_hour: per(totals.total_coins, hours),
        coins_per_wave: per(totals.total_coins, waves),
        cells_per_hour: per(totals.total_cells, hours),
        cells_per_wave: per(totals.total_cells, waves),
        reroll_shards_per_hour: per(totals.total_reroll_shards, hours),
        shards_per_wave: per(totals.total_reroll_shards, waves),
        gems_per_hour: per(totals.total_gems, hours),
        waves_per_hour: per(totals.total_waves, hours),
    }
}
