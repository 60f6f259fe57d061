//! Integration tests for run analytics, submission validation, and lab advice.

use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use tower_stats_web::logic::{Pagination, TierCount};
use tower_stats_web::{
    calculate_rates, calculate_totals, lab_priorities, progress, stats_summary,
    tier_distribution, LabFocus, ProgressMetric, Run, RunCategory, RunStats, StatValue,
    StatsError, SubmitRun, UserLabs,
};

fn run(tier: u32, wave: u32, stats: &[(&str, StatValue)]) -> Run {
    let stats: RunStats = stats
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    Run::new(Some("u1".to_string()), tier, wave, stats)
}

fn text(s: &str) -> StatValue {
    StatValue::Text(s.to_string())
}

fn two_runs() -> Vec<Run> {
    let mut first = run(
        10,
        2000,
        &[
            ("coins_earned", StatValue::Number(1e12)),
            ("cells_earned", StatValue::Number(1000.0)),
            ("game_time", text("4h")),
            ("real_time", text("2h")),
        ],
    );
    first.submitted_at = Utc::now() - Duration::hours(5);
    let second = run(
        12,
        3000,
        &[("coins_earned", text("2T")), ("real_time", text("3h"))],
    );
    vec![first, second]
}

fn submission(body: serde_json::Value) -> SubmitRun {
    serde_json::from_value(body).unwrap()
}

#[test]
fn totals_and_hourly_rates() {
    let totals = calculate_totals(&two_runs());
    assert_eq!(totals.total_coins, 3e12);
    assert_eq!(totals.total_cells, 1000.0);
    assert_eq!(totals.total_real_time, 5.0);
    assert_eq!(totals.total_game_time, 4.0);
    assert_eq!(totals.total_waves, 5000.0);

    let rates = calculate_rates(&totals);
    assert_eq!(rates.coins_per_hour, 6e11);
    assert_eq!(rates.coins_per_wave, 6e8);
    assert_eq!(rates.waves_per_hour, 1000.0);
    assert_eq!(rates.cells_per_hour, 200.0);
}

#[test]
fn rates_without_play_time_are_zero() {
    let totals = calculate_totals(&[run(1, 10, &[("coins_earned", StatValue::Number(50.0))])]);
    let rates = calculate_rates(&totals);
    assert_eq!(rates.coins_per_hour, 0.0);
    assert_eq!(rates.coins_per_wave, 5.0);
}

#[test]
fn summary_over_runs() {
    let s = stats_summary(&two_runs());
    assert_eq!(s.total_runs, 2);
    assert_eq!(s.max_tier, 12);
    assert_eq!(s.max_wave, 3000);
    assert_eq!(s.avg_tier, 11.0);
    assert_eq!(s.avg_wave, 2500.0);
    assert_eq!(s.total_coins, 3e12);
    assert_eq!(s.total_play_time_hours, 5.0);
    assert_eq!(s.coins_per_hour, 6e11);
    assert!(s.first_run < s.last_run);
}

#[test]
fn summary_of_nothing_is_empty() {
    let s = stats_summary(&[]);
    assert_eq!(s.total_runs, 0);
    assert_eq!(s.first_run, None);
}

#[test]
fn progress_is_oldest_first() {
    let mut runs = two_runs();
    runs.reverse();
    let points = progress(&runs, ProgressMetric::CoinsEarned);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1e12, 2e12]);
    assert_eq!(points[0].tier, 10);

    let tiers = progress(&runs, ProgressMetric::Tier);
    assert_eq!(tiers[1].value, 12.0);
}

#[test]
fn progress_metric_names() {
    assert_eq!(ProgressMetric::parse(None), Ok(ProgressMetric::Tier));
    assert_eq!(ProgressMetric::parse(Some("")), Ok(ProgressMetric::Tier));
    assert_eq!(ProgressMetric::parse(Some("gems_earned")), Ok(ProgressMetric::GemsEarned));
    assert_eq!(ProgressMetric::GemsEarned.key(), "gems_earned");
    let err = ProgressMetric::parse(Some("bogus")).unwrap_err();
    assert_eq!(err, StatsError::InvalidMetric("bogus".to_string()));
    assert!(err.to_string().contains("damage_dealt"));
}

#[test]
fn tier_distribution_counts_runs() {
    let mut runs = two_runs();
    runs.push(run(10, 1500, &[]));
    assert_eq!(
        tier_distribution(&runs),
        vec![TierCount { tier: 10, count: 2 }, TierCount { tier: 12, count: 1 }]
    );
}

#[test]
fn valid_submission_becomes_a_run() {
    let run = submission(serde_json::json!({
        "discord_user_id": "u1",
        "tier": 11,
        "wave": 2500,
        "category": "farm",
        "session_name": "weekend",
        "coins_earned": "1.5T",
        "game_time": "1d 2h",
        "killed_by": "Boss"
    }))
    .into_run()
    .unwrap();
    assert_eq!(run.tier, 11);
    assert_eq!(run.wave, 2500);
    assert_eq!(run.category, Some(RunCategory::Farm));
    assert_eq!(run.session_name.as_deref(), Some("weekend"));
    assert_eq!(run.number("coins_earned"), 1.5e12);
    assert_eq!(run.text("killed_by"), Some("Boss"));
    assert!(!run.stats.contains_key("tier"));
    assert!(run.is_owned_by("u1"));
}

#[test]
fn blank_numeric_fields_count_as_zero() {
    let run = submission(serde_json::json!({
        "tier": 5,
        "wave": 100,
        "coins_earned": "",
        "cells_earned": "  "
    }))
    .into_run()
    .unwrap();
    assert_eq!(run.stats["coins_earned"], StatValue::Number(0.0));
    assert_eq!(run.number("cells_earned"), 0.0);
}

#[test]
fn invalid_submissions_are_rejected() {
    let base = || {
        serde_json::json!({ "discord_user_id": "u1", "tier": 11, "wave": 2500 })
    };
    let with = |key: &str, value: serde_json::Value| {
        let mut body = base();
        body[key] = value;
        submission(body).into_run().unwrap_err()
    };

    assert_eq!(
        with("game_time", serde_json::json!("soon")),
        StatsError::InvalidTimeFormat("game_time".to_string())
    );
    assert!(matches!(
        with("tier", serde_json::json!(11.5)),
        StatsError::InvalidField { ref field, .. } if field == "tier"
    ));
    assert!(matches!(
        with("coins_earned", serde_json::json!(-5)),
        StatsError::InvalidField { ref field, .. } if field == "coins_earned"
    ));
    assert_eq!(
        with("session_name", serde_json::json!("x".repeat(101))),
        StatsError::SessionNameTooLong
    );
    assert_eq!(
        with("category", serde_json::json!("speedrun")),
        StatsError::InvalidCategory("speedrun".to_string())
    );

    let missing_wave = submission(serde_json::json!({ "tier": 3 })).into_run();
    assert_eq!(missing_wave.unwrap_err(), StatsError::MissingField("wave"));
}

#[test]
fn pagination_is_clamped() {
    assert_eq!(Pagination::clamp(None, None), Pagination { limit: 50, offset: 0 });
    assert_eq!(
        Pagination::clamp(Some(5000), Some(-3)),
        Pagination { limit: 1000, offset: 0 }
    );
    assert_eq!(Pagination::clamp(Some(0), Some(20)).limit, 1);
}

fn labs() -> UserLabs {
    let levels: BTreeMap<String, u32> = [("damage", 5), ("attack-speed", 999), ("health", 1200)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    UserLabs::new("u1", levels, None, None)
}

#[test]
fn lab_levels_are_clamped_with_defaults() {
    let labs = labs();
    assert_eq!(labs.level("health"), 999);
    assert_eq!(labs.level("range"), 0);
    assert_eq!((labs.tier, labs.wave), (1, 1));
}

#[test]
fn damage_advice_orders_by_roi_and_skips_maxed() {
    let advice = lab_priorities(&labs(), LabFocus::Damage);
    let names: Vec<&str> = advice.iter().map(|a| a.lab_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "super-tower-bonus",
            "damage",
            "critical-factor",
            "range",
            "super-crit-multi",
            "super-crit-chance",
        ]
    );
    assert_eq!(advice[0].roi, 1.69);
    assert_eq!(advice[1].current_level, 5);
    assert_eq!(advice[1].next_level, 6);
    assert_eq!(advice[5].roi, 0.86);
}

#[test]
fn focus_filters_categories() {
    assert_eq!(lab_priorities(&labs(), LabFocus::Health).len(), 3);
    assert_eq!(lab_priorities(&labs(), LabFocus::Economy).len(), 6);
    assert_eq!(lab_priorities(&labs(), LabFocus::All).len(), 15);
    assert_eq!(LabFocus::parse(None), Ok(LabFocus::Damage));
    assert_eq!(
        LabFocus::parse(Some("speed")),
        Err(StatsError::InvalidFocus("speed".to_string()))
    );
}
