//! Run submission and management.

use super::{error_response, read_store, write_store, StoreState, UserQuery};
use crate::logic::{run_from_report, validate_session_name, Pagination, SubmitRun};
use crate::models::{RunCategory, RunId};
use crate::parse::{format_compact, parse_stats_text};
use crate::store::RunFilter;
use actix_web::{
    delete, get, patch, post,
    web::{Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct UploadQuery {
    #[serde(default)]
    discord_user_id: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    session_name: Option<String>,
}

#[derive(Deserialize)]
struct RunsQuery {
    #[serde(default)]
    discord_user_id: Option<String>,
    #[serde(default)]
    limit: Option<i64>,
    #[serde(default)]
    offset: Option<i64>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    session: Option<String>,
}

#[derive(Deserialize)]
struct CategoryBody {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    discord_user_id: Option<String>,
}

/// Path segment: run id (e.g. /api/tower/runs/{id})
#[derive(Deserialize)]
struct RunPath {
    id: RunId,
}

/// Parse a pasted battle report and store it as a run.
#[post("/api/tower/runs/upload")]
async fn api_upload_run(
    state: StoreState,
    query: Query<UploadQuery>,
    body: String,
) -> HttpResponse {
    let query = query.into_inner();
    let stats = match parse_stats_text(&body) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let category = match query.category.as_deref().map(RunCategory::parse).transpose() {
        Ok(c) => c.flatten(),
        Err(e) => return error_response(&e),
    };
    if let Err(e) = validate_session_name(query.session_name.as_deref()) {
        return error_response(&e);
    }
    let user = query.discord_user_id.filter(|u| !u.trim().is_empty());
    let mut run = match run_from_report(user, stats) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    run.category = category;
    run.session_name = query.session_name.filter(|s| !s.trim().is_empty());

    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    log::info!(
        "Stored uploaded run {} (tier {}, wave {}, {} coins)",
        run.id,
        run.tier,
        run.wave,
        format_compact(run.number("coins_earned"))
    );
    let run_id = store.insert_run(run.clone());
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "run_id": run_id, "data": run }))
}

/// Validate and store a run submitted as JSON.
#[post("/api/tower/runs/submit-stats")]
async fn api_submit_stats(state: StoreState, body: Json<SubmitRun>) -> HttpResponse {
    let run = match body.into_inner().into_run() {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };
    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    log::info!("Stored submitted run {} (tier {}, wave {})", run.id, run.tier, run.wave);
    let run_id = store.insert_run(run.clone());
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "run_id": run_id, "data": run }))
}

/// A user's runs, newest first.
#[get("/api/tower/runs")]
async fn api_list_runs(state: StoreState, query: Query<RunsQuery>) -> HttpResponse {
    let pagination = Pagination::clamp(query.limit, query.offset);
    let category = match query.category.as_deref().map(RunCategory::parse).transpose() {
        Ok(c) => c.flatten(),
        Err(e) => return error_response(&e),
    };
    let user = match query.discord_user_id.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(u) => u,
        None => {
            return HttpResponse::Ok().json(serde_json::json!({
                "runs": [], "count": 0, "limit": pagination.limit, "offset": pagination.offset
            }))
        }
    };
    let filter = RunFilter {
        pagination,
        category,
        session: query.session.clone().filter(|s| !s.is_empty()),
    };
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let runs = store.runs_for(user, &filter);
    HttpResponse::Ok().json(serde_json::json!({
        "runs": runs,
        "count": runs.len(),
        "limit": pagination.limit,
        "offset": pagination.offset,
    }))
}

/// Distinct session names used by the user.
#[get("/api/tower/sessions")]
async fn api_list_sessions(state: StoreState, query: Query<UserQuery>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let sessions = query.user().map(|u| store.sessions(u)).unwrap_or_default();
    HttpResponse::Ok().json(serde_json::json!({ "sessions": sessions }))
}

#[get("/api/tower/runs/{id}")]
async fn api_get_run(state: StoreState, path: Path<RunPath>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match store.get_run(path.id) {
        Some(run) => HttpResponse::Ok().json(run),
        None => error_response(&crate::models::StatsError::RunNotFound(path.id)),
    }
}

/// Delete a run; with `discord_user_id` given, only the owner may delete it.
#[delete("/api/tower/runs/{id}")]
async fn api_delete_run(
    state: StoreState,
    path: Path<RunPath>,
    query: Query<UserQuery>,
) -> HttpResponse {
    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match store.delete_run(path.id, query.user()) {
        Ok(run) => {
            log::info!("Deleted run {}", run.id);
            HttpResponse::Ok().json(serde_json::json!({ "success": true, "run_id": run.id }))
        }
        Err(e) => error_response(&e),
    }
}

/// Set or clear (empty string / null) a run's category.
#[patch("/api/tower/runs/{id}/category")]
async fn api_set_run_category(
    state: StoreState,
    path: Path<RunPath>,
    body: Json<CategoryBody>,
) -> HttpResponse {
    let category = match RunCategory::parse(body.category.as_deref().unwrap_or("")) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    let user = body.discord_user_id.as_deref().filter(|u| !u.trim().is_empty());
    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match store.set_run_category(path.id, category, user) {
        Ok(run) => HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": run })),
        Err(e) => error_response(&e),
    }
}
