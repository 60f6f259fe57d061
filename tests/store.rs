//! Integration tests for the in-process store.

use chrono::{Duration, NaiveDate, Utc};
use tower_stats_web::logic::Pagination;
use tower_stats_web::store::{AnalysisRecord, RunFilter};
use tower_stats_web::{
    analyze_bracket_difficulty, Bracket, BracketPlayer, Run, RunCategory, RunStats, StatsError,
    Store, TournamentResult,
};
use uuid::Uuid;

fn run_for(user: &str, wave: u32, hours_ago: i64) -> Run {
    let mut run = Run::new(Some(user.to_string()), 10, wave, RunStats::new());
    run.submitted_at = Utc::now() - Duration::hours(hours_ago);
    run
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

fn bracket(id: &str, waves: &[u32]) -> Bracket {
    let players = waves
        .iter()
        .enumerate()
        .map(|(i, &wave)| BracketPlayer {
            player_id: format!("{id}-{i}"),
            name: format!("{id} {i}"),
            real_name: None,
            wave,
            rank: i as u32 + 1,
            relic: None,
        })
        .collect();
    Bracket::new(id, players)
}

#[test]
fn runs_are_listed_newest_first_per_user() {
    let mut store = Store::new();
    store.insert_run(run_for("u1", 100, 3));
    store.insert_run(run_for("u1", 300, 1));
    store.insert_run(run_for("u1", 200, 2));
    store.insert_run(run_for("u2", 999, 0));

    let waves: Vec<u32> = store
        .runs_for("u1", &RunFilter::default())
        .iter()
        .map(|r| r.wave)
        .collect();
    assert_eq!(waves, vec![300, 200, 100]);

    let page = RunFilter {
        pagination: Pagination { limit: 1, offset: 1 },
        ..RunFilter::default()
    };
    assert_eq!(store.runs_for("u1", &page)[0].wave, 200);
    assert!(store.runs_for("nobody", &RunFilter::default()).is_empty());
}

#[test]
fn category_and_session_filters() {
    let mut store = Store::new();
    let mut farm = run_for("u1", 100, 2);
    farm.category = Some(RunCategory::Farm);
    farm.session_name = Some("week 1".to_string());
    store.insert_run(farm);
    store.insert_run(run_for("u1", 200, 1));

    let farms = RunFilter {
        category: Some(RunCategory::Farm),
        ..RunFilter::default()
    };
    assert_eq!(store.runs_for("u1", &farms).len(), 1);

    let session = RunFilter {
        session: Some("week 1".to_string()),
        ..RunFilter::default()
    };
    assert_eq!(store.runs_for("u1", &session)[0].wave, 100);
    assert_eq!(store.sessions("u1"), vec!["week 1".to_string()]);
}

#[test]
fn delete_checks_ownership() {
    let mut store = Store::new();
    let id = store.insert_run(run_for("u1", 100, 0));
    assert_eq!(store.delete_run(id, Some("u2")), Err(StatsError::RunNotFound(id)));
    assert!(store.get_run(id).is_some());
    assert_eq!(store.delete_run(id, Some("u1")).map(|r| r.id), Ok(id));
    assert!(store.get_run(id).is_none());
    assert_eq!(store.delete_run(id, None), Err(StatsError::RunNotFound(id)));
}

#[test]
fn category_can_be_set_and_cleared() {
    let mut store = Store::new();
    let id = store.insert_run(run_for("u1", 100, 0));
    let run = store
        .set_run_category(id, Some(RunCategory::Tournament), Some("u1"))
        .unwrap();
    assert_eq!(run.category, Some(RunCategory::Tournament));
    store.set_run_category(id, None, None).unwrap();
    assert_eq!(store.get_run(id).unwrap().category, None);
    assert!(store.set_run_category(id, None, Some("u2")).is_err());
}

#[test]
fn tournament_results_accumulate_per_user() {
    let mut store = Store::new();
    let result = TournamentResult {
        date: "2025-01-05".to_string(),
        name: "Legend".to_string(),
        rank: 4,
        score: 4200,
        tier: 14,
        wave: 4200,
        rewards: String::new(),
    };
    assert_eq!(store.add_tournament_results("u1", vec![result.clone()]), 1);
    store.add_tournament_results("u1", vec![result]);
    assert_eq!(store.tournament_results("u1").len(), 2);
    assert!(store.tournament_results("u2").is_empty());
}

#[test]
fn latest_snapshot_wins_and_reimport_replaces() {
    let mut store = Store::new();
    store.import_brackets("Legend", date(5), vec![bracket("old", &[100])]);
    store.import_brackets("legend ", date(12), vec![bracket("new", &[200])]);
    store.import_brackets("Champion", date(20), vec![bracket("champ", &[50])]);

    let latest = store.latest_brackets("LEGEND").unwrap();
    assert_eq!(latest.tournament_date, date(12));
    assert_eq!(latest.brackets[0].bracket_id, "new");

    store.import_brackets("Legend", date(12), vec![bracket("fixed", &[300]), bracket("x", &[1])]);
    assert_eq!(store.latest_brackets("Legend").unwrap().brackets.len(), 2);
    assert!(store.latest_brackets("Gold").is_none());
}

#[test]
fn analyses_are_kept_per_user_and_run() {
    let mut store = Store::new();
    let brackets = vec![bracket("A", &[300, 200]), bracket("B", &[100])];
    let run_id = Uuid::new_v4();
    for (i, linked) in [(0, None), (1, Some(run_id)), (2, None)] {
        store.save_analysis(AnalysisRecord {
            id: Uuid::new_v4(),
            discord_user_id: "u1".to_string(),
            run_id: linked,
            league: "legend".to_string(),
            tournament_date: date(5),
            analyzed_at: Utc::now() - Duration::minutes(10 - i),
            analysis: analyze_bracket_difficulty("A-1", 200, &brackets).unwrap(),
        });
    }

    let recent = store.analyses_for_user("u1", 2);
    assert_eq!(recent.len(), 2);
    assert!(recent[0].analyzed_at > recent[1].analyzed_at);
    assert_eq!(recent[1].run_id, Some(run_id));
    assert!(store.analyses_for_user("u2", 10).is_empty());

    let linked = store.analysis_for_run(run_id).unwrap();
    assert_eq!(linked.analysis.actual_rank, 2);
    assert!(store.analysis_for_run(Uuid::new_v4()).is_none());
}
