//! Tournament bracket import, difficulty analysis, and league overview.

use super::{error_response, read_store, write_store, StoreState};
use crate::logic::{analyze_bracket_difficulty, league_stats};
use crate::models::{Bracket, BracketInput, BracketPlayer, RunId, StatsError};
use crate::store::{AnalysisRecord, BracketSnapshot};
use actix_web::{
    get, post,
    web::{Json, Path, Query},
    HttpResponse,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

const DEFAULT_LEAGUE: &str = "Legend";

#[derive(Deserialize)]
struct ImportBracketsBody {
    league: String,
    tournament_date: NaiveDate,
    brackets: Vec<BracketInput>,
}

#[derive(Deserialize)]
struct LeagueQuery {
    #[serde(default)]
    league: Option<String>,
}

impl LeagueQuery {
    fn league(&self) -> &str {
        self.league
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_LEAGUE)
    }
}

#[derive(Deserialize)]
struct AnalyzeBody {
    discord_user_id: String,
    player_id: String,
    #[serde(default)]
    league: Option<String>,
    #[serde(default)]
    run_id: Option<RunId>,
}

#[derive(Deserialize)]
struct LimitQuery {
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct PlayerPath {
    player_id: String,
}

#[derive(Deserialize)]
struct LeaguePath {
    league: String,
}

#[derive(Deserialize)]
struct UserPath {
    discord_user_id: String,
}

#[derive(Deserialize)]
struct RunPath {
    run_id: RunId,
}

/// The player's own entry in the snapshot, with the bracket it sits in.
fn find_player<'a>(
    snapshot: &'a BracketSnapshot,
    player_id: &str,
) -> Option<(&'a Bracket, &'a BracketPlayer)> {
    snapshot.brackets.iter().find_map(|b| {
        b.players
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| (b, p))
    })
}

/// Store all brackets of one league's tournament; re-importing the same date replaces it.
#[post("/api/tournament-brackets/import")]
async fn api_import_brackets(state: StoreState, body: Json<ImportBracketsBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.league.trim().is_empty() {
        return error_response(&StatsError::MissingField("league"));
    }
    if body.brackets.is_empty() {
        return error_response(&StatsError::EmptyInput);
    }
    let brackets: Vec<Bracket> = body.brackets.into_iter().map(Bracket::from).collect();
    let players: usize = brackets.iter().map(|b| b.players.len()).sum();

    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let snapshot = store.import_brackets(&body.league, body.tournament_date, brackets);
    log::info!(
        "Imported {} bracket(s) with {} player(s) for {} on {}",
        snapshot.brackets.len(),
        players,
        snapshot.league,
        snapshot.tournament_date
    );
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "league": snapshot.league,
        "tournament_date": snapshot.tournament_date,
        "brackets_imported": snapshot.brackets.len(),
        "players_imported": players,
    }))
}

/// How hard the player's bracket was in the league's latest tournament.
#[get("/api/tournament-brackets/difficulty/{player_id}")]
async fn api_player_difficulty(
    state: StoreState,
    path: Path<PlayerPath>,
    query: Query<LeagueQuery>,
) -> HttpResponse {
    let league = query.league();
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let snapshot = match store.latest_brackets(league) {
        Some(s) => s,
        None => return error_response(&StatsError::NoBracketData),
    };
    let (_, player) = match find_player(snapshot, &path.player_id) {
        Some(found) => found,
        None => return error_response(&StatsError::PlayerNotInBrackets(path.player_id.clone())),
    };
    match analyze_bracket_difficulty(&path.player_id, player.wave, &snapshot.brackets) {
        Ok(analysis) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "player": {
                "id": player.player_id,
                "name": player.name,
                "real_name": player.real_name,
                "wave": player.wave,
                "actual_rank": player.rank,
            },
            "league": league,
            "tournament_date": snapshot.tournament_date,
            "analysis": analysis,
            "total_brackets": snapshot.brackets.len(),
            "timestamp": Utc::now(),
        })),
        Err(e) => error_response(&e),
    }
}

/// Compute an analysis for a user and keep it, optionally linked to one of their runs.
#[post("/api/tournament-brackets/analyze")]
async fn api_analyze(state: StoreState, body: Json<AnalyzeBody>) -> HttpResponse {
    let body = body.into_inner();
    if body.discord_user_id.trim().is_empty() {
        return error_response(&StatsError::MissingField("discord_user_id"));
    }
    if body.player_id.trim().is_empty() {
        return error_response(&StatsError::MissingField("player_id"));
    }
    let league = body
        .league
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LEAGUE.to_string());

    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    if let Some(run_id) = body.run_id {
        if store.get_run(run_id).is_none() {
            return error_response(&StatsError::RunNotFound(run_id));
        }
    }
    let (tournament_date, analysis) = {
        let snapshot = match store.latest_brackets(&league) {
            Some(s) => s,
            None => return error_response(&StatsError::NoBracketData),
        };
        let wave = match find_player(snapshot, &body.player_id) {
            Some((_, p)) => p.wave,
            None => return error_response(&StatsError::PlayerNotInBrackets(body.player_id)),
        };
        match analyze_bracket_difficulty(&body.player_id, wave, &snapshot.brackets) {
            Ok(a) => (snapshot.tournament_date, a),
            Err(e) => return error_response(&e),
        }
    };
    log::info!(
        "Bracket difficulty for {}: {:.1} ({:?})",
        body.player_id,
        analysis.difficulty_score,
        analysis.difficulty_label
    );
    let record = store.save_analysis(AnalysisRecord {
        id: Uuid::new_v4(),
        discord_user_id: body.discord_user_id,
        run_id: body.run_id,
        league,
        tournament_date,
        analyzed_at: Utc::now(),
        analysis,
    });
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": record }))
}

/// Wave spread and hardest/easiest brackets of the league's latest tournament.
#[get("/api/tournament-brackets/stats/{league}")]
async fn api_league_stats(state: StoreState, path: Path<LeaguePath>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let snapshot = match store.latest_brackets(&path.league) {
        Some(s) => s,
        None => return error_response(&StatsError::NoBracketData),
    };
    match league_stats(&snapshot.brackets) {
        Ok(stats) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "league": path.league,
            "tournament_date": snapshot.tournament_date,
            "stats": stats,
        })),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournament-brackets/user/{discord_user_id}")]
async fn api_user_analyses(
    state: StoreState,
    path: Path<UserPath>,
    query: Query<LimitQuery>,
) -> HttpResponse {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let analyses = store.analyses_for_user(&path.discord_user_id, limit);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "discord_user_id": path.discord_user_id,
        "count": analyses.len(),
        "analyses": analyses,
    }))
}

#[get("/api/tournament-brackets/run/{run_id}")]
async fn api_run_analysis(state: StoreState, path: Path<RunPath>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match store.analysis_for_run(path.run_id) {
        Some(record) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "run_id": path.run_id,
            "analysis": record,
        })),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "success": false,
            "error": "No bracket difficulty analysis found for this run",
        })),
    }
}
