//! REST surface. Every route is registered through `configure` so the binary and the
//! integration tests mount the same app.

mod brackets;
mod content;
mod labs;
mod runs;
mod stats;
mod tournaments;

use crate::config::Config;
use crate::feed::ContentHub;
use crate::models::StatsError;
use crate::store::Store;
use actix_web::{
    get,
    web::{self, Data, ServiceConfig},
    HttpResponse, Responder,
};
use serde::Deserialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared store handed to every handler.
pub type StoreState = Data<RwLock<Store>>;
pub type HubState = Data<ContentHub>;
pub type ConfigState = Data<Config>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// `?discord_user_id=` on per-user endpoints.
#[derive(Deserialize)]
struct UserQuery {
    #[serde(default)]
    discord_user_id: Option<String>,
}

impl UserQuery {
    fn user(&self) -> Option<&str> {
        self.discord_user_id
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Register all routes (API, index page, favicon).
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .service(api_health)
        .service(favicon)
        .service(runs::api_upload_run)
        .service(runs::api_submit_stats)
        .service(runs::api_list_runs)
        .service(runs::api_list_sessions)
        .service(runs::api_get_run)
        .service(runs::api_delete_run)
        .service(runs::api_set_run_category)
        .service(stats::api_stats)
        .service(stats::api_progress)
        .service(stats::api_tier_distribution)
        .service(stats::api_rates)
        .service(tournaments::api_import_tournaments)
        .service(tournaments::api_list_tournaments)
        .service(brackets::api_import_brackets)
        .service(brackets::api_player_difficulty)
        .service(brackets::api_analyze)
        .service(brackets::api_league_stats)
        .service(brackets::api_user_analyses)
        .service(brackets::api_run_analysis)
        .service(labs::api_get_labs)
        .service(labs::api_get_lab_level)
        .service(labs::api_save_labs)
        .service(labs::api_lab_recommendations)
        .service(content::api_reddit)
        .service(content::api_reddit_refresh)
        .service(content::api_videos)
        .service(content::api_videos_refresh);
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tower-stats-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn serve_index() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}

/// Not-found style errors map to 404, everything else the caller got wrong to 400.
fn error_response(e: &StatsError) -> HttpResponse {
    let body = serde_json::json!({ "success": false, "error": e.to_string() });
    match e {
        StatsError::RunNotFound(_)
        | StatsError::NoBracketData
        | StatsError::PlayerNotInBrackets(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "lock error" }))
}

fn read_store(state: &StoreState) -> Result<RwLockReadGuard<'_, Store>, HttpResponse> {
    state.read().map_err(|_| lock_error())
}

fn write_store(state: &StoreState) -> Result<RwLockWriteGuard<'_, Store>, HttpResponse> {
    state.write().map_err(|_| lock_error())
}
