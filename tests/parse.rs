//! Integration tests for the report, number, time, and tournament-CSV parsers.

use tower_stats_web::parse::{
    column_for_label, format_compact, is_valid_time_format, parse_game_time, parse_number,
    parse_number_or_zero, parse_stat_value, parse_stats_text, parse_tournament_csv,
};
use tower_stats_web::{StatValue, StatsError};

fn approx(actual: Option<f64>, expected: f64) {
    let actual = actual.unwrap_or_else(|| panic!("expected {expected}, got None"));
    let tolerance = expected.abs().max(1.0) * 1e-9;
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn suffixes_scale_the_value() {
    approx(parse_number("1.23M"), 1.23e6);
    approx(parse_number("$4.5B"), 4.5e9);
    approx(parse_number("1.24T"), 1.24e12);
    approx(parse_number("3q"), 3e15);
    approx(parse_number("3Q"), 3e18);
    approx(parse_number("10Qnd"), 1e49);
    approx(parse_number("1.5s"), 1.5e21);
}

#[test]
fn european_and_grouped_numbers() {
    approx(parse_number("217,87"), 217.87);
    approx(parse_number("5,432"), 5.432);
    approx(parse_number("1.234.567"), 1_234_567.0);
    approx(parse_number("1.234,56"), 1234.56);
    approx(parse_number("1,234.56"), 1234.56);
    approx(parse_number("2,5K"), 2500.0);
}

#[test]
fn plain_percent_and_negative_numbers() {
    approx(parse_number("95%"), 95.0);
    approx(parse_number("-12"), -12.0);
    approx(parse_number(" 1 000 "), 1000.0);
}

#[test]
fn lone_dot_is_always_a_decimal_point() {
    approx(parse_number("0.125"), 0.125);
    approx(parse_number("12.345%"), 12.345);
    approx(parse_number("1.250"), 1.25);
    assert_eq!(parse_stat_value("1.250"), StatValue::Number(1.25));
}

#[test]
fn non_numbers_are_rejected() {
    assert_eq!(parse_number(""), None);
    assert_eq!(parse_number("abc"), None);
    assert_eq!(parse_number("Boss"), None);
    assert_eq!(parse_number_or_zero("N/A"), 0.0);
}

#[test]
fn compact_formatting() {
    assert_eq!(format_compact(1_500_000.0), "1.50M");
    assert_eq!(format_compact(999.0), "999");
    assert_eq!(format_compact(12.5), "12.50");
    assert_eq!(format_compact(2.5e33), "2.50D");
}

#[test]
fn game_time_strings() {
    let d = parse_game_time("2d 14h 15m 14s").unwrap();
    assert_eq!(d.seconds(), 2 * 86_400 + 14 * 3600 + 15 * 60 + 14);
    assert_eq!(parse_game_time("14h 38m 50s Real Time").unwrap().seconds(), 52_730);
    assert_eq!(parse_game_time("1h30m").unwrap().seconds(), 5400);
    assert!((parse_game_time("1h 30m").unwrap().hours() - 1.5).abs() < 1e-12);
    assert_eq!(parse_game_time(""), None);
    assert_eq!(parse_game_time("soon"), None);
}

#[test]
fn strict_time_format() {
    assert!(is_valid_time_format("1h 30m"));
    assert!(is_valid_time_format("2d 3h 4m 5s"));
    assert!(!is_valid_time_format("1.5h"));
    assert!(!is_valid_time_format("abc"));
    assert!(!is_valid_time_format(""));
}

#[test]
fn stat_values_are_classified() {
    assert_eq!(parse_stat_value("14+"), StatValue::Number(14.0));
    assert_eq!(parse_stat_value("-"), StatValue::Number(0.0));
    assert_eq!(parse_stat_value(""), StatValue::Number(0.0));
    assert_eq!(parse_stat_value("1h 2m"), StatValue::Text("1h 2m".to_string()));
    assert_eq!(parse_stat_value("x8,00"), StatValue::Text("x8,00".to_string()));
    assert_eq!(parse_stat_value("Boss"), StatValue::Text("Boss".to_string()));
}

#[test]
fn labels_map_to_columns() {
    assert_eq!(column_for_label("Coins Earned"), "coins_earned");
    assert_eq!(column_for_label("Gems"), "gems_earned");
    assert_eq!(column_for_label("Some Label (x2)"), "some_label_x2");
}

#[test]
fn battle_report_with_tabs() {
    let report = "Battle Report\n\
        Game Time\t1d 13h 24m 51s\n\
        Real Time\t7h 46m 6s\n\
        Tier\t11\n\
        Wave\t3011\n\
        Killed By\tBoss\n\
        Coins Earned\t1.24T\n\
        Cells Earned\t2.53K\n\
        Damage Multiplier\tx8,00\n";
    let stats = parse_stats_text(report).unwrap();
    assert_eq!(stats["game_time"], StatValue::Text("1d 13h 24m 51s".to_string()));
    assert_eq!(stats["tier"], StatValue::Number(11.0));
    assert_eq!(stats["wave"], StatValue::Number(3011.0));
    assert_eq!(stats["killed_by"], StatValue::Text("Boss".to_string()));
    approx(Some(stats["coins_earned"].as_number()), 1.24e12);
    approx(Some(stats["cells_earned"].as_number()), 2530.0);
    assert_eq!(stats["damage_multiplier"], StatValue::Text("x8,00".to_string()));
    assert!(!stats.contains_key("battle_report"));
}

#[test]
fn battle_report_with_wide_spaces() {
    let stats = parse_stats_text("Coins Earned    1.5M\nWave   120").unwrap();
    approx(Some(stats["coins_earned"].as_number()), 1.5e6);
    assert_eq!(stats["wave"], StatValue::Number(120.0));
}

#[test]
fn empty_report_is_rejected() {
    assert_eq!(parse_stats_text("hello world"), Err(StatsError::EmptyInput));
    assert_eq!(parse_stats_text(""), Err(StatsError::EmptyInput));
}

#[test]
fn tournament_csv_skips_bad_rows() {
    let csv = "2024-01-05,Legend,3,4500,14,4500,Gems x 50\n\
               2024-01-12,Legend,bad,1,1,1\n\
               2024-01-19,Champion,1,3000,12,3000\n\
               too,short\n";
    let results = parse_tournament_csv(csv);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Legend");
    assert_eq!(results[0].rank, 3);
    assert_eq!(results[0].rewards, "Gems x 50");
    assert_eq!(results[1].tier, 12);
    assert_eq!(results[1].rewards, "");
}

#[test]
fn tournament_csv_with_tabs() {
    let results = parse_tournament_csv("2024-01-05\tLegend\t3\t4500\t14\t4500\n");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].wave, 4500);
}

#[test]
fn tab_rows_keep_commas_in_rewards() {
    let content = "2024-01-05\tLegend\t3\t4500\t14\t4500\tGems x 50, Stones x 10\n\
                   2024-01-12,Champion,2,3100,12,3100\n";
    let results = parse_tournament_csv(content);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].rewards, "Gems x 50, Stones x 10");
    assert_eq!(results[1].name, "Champion");
}
