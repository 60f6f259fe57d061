//! Pasted battle-report text: one `Label<TAB>Value` pair per line, or label and value
//! split by 2+ spaces.

use crate::models::{RunStats, StatValue, StatsError};
use crate::parse::number::parse_number;
use crate::parse::time::is_valid_time_format;
use regex::Regex;
use std::sync::OnceLock;

/// Battle-report label -> column key.
const LABELS: &[(&str, &str)] = &[
    ("Game Time", "game_time"),
    ("Real Time", "real_time"),
    ("Tier", "tier"),
    ("Wave", "wave"),
    ("Killed By", "killed_by"),
    ("Coins Earned", "coins_earned"),
    ("Cash Earned", "cash_earned"),
    ("Interest Earned", "interest_earned"),
    ("Gem Blocks Tapped", "gem_blocks_tapped"),
    ("Cells Earned", "cells_earned"),
    ("Reroll Shards Earned", "reroll_shards_earned"),
    ("Damage Taken", "damage_taken"),
    ("Damage Taken Wall", "damage_taken_wall"),
    ("Damage Taken While Berserked", "damage_taken_berserked"),
    ("Damage Gain From Berserk", "damage_gain_berserk"),
    ("Death Defy", "death_defy"),
    ("Damage Dealt", "damage_dealt"),
    ("Projectiles Damage", "projectiles_damage"),
    ("Rend Armor Damage", "rend_armor_damage"),
    ("Projectiles Count", "projectiles_count"),
    ("Lifesteal", "lifesteal"),
    ("Thorn Damage", "thorn_damage"),
    ("Orb Damage", "orb_damage"),
    ("Orb Hits", "orb_hits"),
    ("Land Mine Damage", "land_mine_damage"),
    ("Land Mines Spawned", "land_mines_spawned"),
    ("Death Ray Damage", "death_ray_damage"),
    ("Smart Missile Damage", "smart_missile_damage"),
    ("Inner Land Mine Damage", "inner_land_mine_damage"),
    ("Chain Lightning Damage", "chain_lightning_damage"),
    ("Death Wave Damage", "death_wave_damage"),
    ("Swamp Damage", "swamp_damage"),
    ("Black Hole Damage", "black_hole_damage"),
    ("Waves Skipped", "waves_skipped"),
    ("Recovery Packages", "recovery_packages"),
    ("Free Attack Upgrade", "free_attack_upgrade"),
    ("Free Defense Upgrade", "free_defense_upgrade"),
    ("Free Utility Upgrade", "free_utility_upgrade"),
    ("HP From Death Wave", "hp_from_death_wave"),
    ("Coins from Death Wave", "coins_from_death_wave"),
    ("Cash from Golden Tower", "cash_from_golden_tower"),
    ("Coins from Golden Tower", "coins_from_golden_tower"),
    ("Coins from Blackhole", "coins_from_blackhole"),
    ("Coins from Spotlight", "coins_from_spotlight"),
    ("Coins from Orbs", "coins_from_orbs"),
    ("Coins from Coin Upgrade", "coins_from_coin_upgrade"),
    ("Coins from Coin Bonuses", "coins_from_coin_bonuses"),
    ("Total Enemies", "total_enemies"),
    ("Basic", "basic_enemies"),
    ("Fast", "fast_enemies"),
    ("Tank", "tank_enemies"),
    ("Ranged", "ranged_enemies"),
    ("Boss", "boss_enemies"),
    ("Protector", "protector_enemies"),
    ("Total Elites", "total_elites"),
    ("Vampires", "vampires"),
    ("Rays", "rays"),
    ("Scatters", "scatters"),
    ("Saboteurs", "saboteurs"),
    ("Commanders", "commanders"),
    ("Overcharges", "overcharges"),
    ("Destroyed by Orbs", "destroyed_by_orbs"),
    ("Destroyed by Thorns", "destroyed_by_thorns"),
    ("Destroyed by Death ray", "destroyed_by_death_ray"),
    ("Destroyed by Land Mine", "destroyed_by_land_mine"),
    ("Flame bot damage", "flame_bot_damage"),
    ("Thunder bot stuns", "thunder_bot_stuns"),
    ("Golden bot coins earned", "golden_bot_coins_earned"),
    ("Damage", "damage_stolen"),
    ("Coins Stolen", "coins_stolen"),
    ("Guardian catches", "guardian_catches"),
    ("Coins Fetched", "coins_fetched"),
    ("Gems", "gems_earned"),
    ("Medals", "medals_earned"),
    ("Reroll Shards", "reroll_shards_earned_total"),
    ("Cannon Shards", "cannon_shards"),
    ("Armor Shards", "armor_shards"),
    ("Generator Shards", "generator_shards"),
    ("Core Shards", "core_shards"),
    ("Common Modules", "common_modules"),
    ("Rare Modules", "rare_modules"),
];

/// Column key for a battle-report label; unknown labels become snake_case.
pub fn column_for_label(label: &str) -> String {
    let label = label.trim();
    LABELS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, key)| key.to_string())
        .unwrap_or_else(|| clean_label(label))
}

/// `Some Label (x2)` -> `some_label_x2`.
fn clean_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.to_lowercase().chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '_' };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    out.trim_matches('_').to_string()
}

/// Classify a raw report value.
pub fn parse_stat_value(raw: &str) -> StatValue {
    let value = raw.trim();
    if value.is_empty() || value == "-" || value.eq_ignore_ascii_case("N/A") {
        return StatValue::Number(0.0);
    }
    if is_valid_time_format(value) {
        return StatValue::Text(value.to_string());
    }
    // Multipliers (x8,00) are display values.
    if value.starts_with('x') || value.starts_with('X') {
        return StatValue::Text(value.to_string());
    }
    // Tier format: 14+
    if let Some(tier) = value.strip_suffix('+') {
        if let Ok(n) = tier.trim().parse::<u32>() {
            return StatValue::Number(n as f64);
        }
    }
    match parse_number(value) {
        Some(n) => StatValue::Number(n),
        None => StatValue::Text(value.to_string()),
    }
}

fn wide_gap_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}").expect("valid gap regex"))
}

/// Split a report line into (label, value).
fn split_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('\t').map(str::trim).filter(|p| !p.is_empty());
    if line.contains('\t') {
        let label = parts.next()?;
        let value = parts.next()?;
        return Some((label, value));
    }
    let mut parts = wide_gap_re().splitn(line.trim(), 2);
    let label = parts.next()?.trim();
    let value = parts.next()?.trim();
    if label.is_empty() || value.is_empty() {
        return None;
    }
    Some((label, value))
}

/// Parse a whole pasted battle report. Lines that aren't label/value pairs are skipped.
pub fn parse_stats_text(content: &str) -> Result<RunStats, StatsError> {
    let mut stats = RunStats::new();
    for line in content.lines() {
        if let Some((label, value)) = split_line(line) {
            let key = column_for_label(label);
            if key.is_empty() {
                continue;
            }
            let parsed = parse_stat_value(value);
            log::debug!("Parsed field {:?} = {:?}", key, parsed);
            stats.insert(key, parsed);
        }
    }
    if stats.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(stats)
}
