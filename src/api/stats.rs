//! Per-user dashboard analytics. Without a user, every endpoint answers with empty data.

use super::{error_response, read_store, StoreState, UserQuery};
use crate::logic::{
    calculate_rates, calculate_totals, progress, stats_summary, tier_distribution, ProgressMetric,
};
use crate::models::Run;
use actix_web::{get, web::Query, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct ProgressQuery {
    #[serde(default)]
    discord_user_id: Option<String>,
    #[serde(default)]
    metric: Option<String>,
}

fn runs_of(state: &StoreState, user: Option<&str>) -> Result<Vec<Run>, HttpResponse> {
    match user {
        Some(u) => Ok(read_store(state)?.user_runs(u)),
        None => Ok(Vec::new()),
    }
}

#[get("/api/tower/stats")]
async fn api_stats(state: StoreState, query: Query<UserQuery>) -> HttpResponse {
    match runs_of(&state, query.user()) {
        Ok(runs) => HttpResponse::Ok().json(stats_summary(&runs)),
        Err(resp) => resp,
    }
}

#[get("/api/tower/progress")]
async fn api_progress(state: StoreState, query: Query<ProgressQuery>) -> HttpResponse {
    let metric = match ProgressMetric::parse(query.metric.as_deref()) {
        Ok(m) => m,
        Err(e) => return error_response(&e),
    };
    let user = query
        .discord_user_id
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty());
    match runs_of(&state, user) {
        Ok(runs) => HttpResponse::Ok().json(serde_json::json!({
            "metric": metric.key(),
            "data": progress(&runs, metric),
        })),
        Err(resp) => resp,
    }
}

#[get("/api/tower/tier-distribution")]
async fn api_tier_distribution(state: StoreState, query: Query<UserQuery>) -> HttpResponse {
    match runs_of(&state, query.user()) {
        Ok(runs) => HttpResponse::Ok()
            .json(serde_json::json!({ "distribution": tier_distribution(&runs) })),
        Err(resp) => resp,
    }
}

/// Lifetime totals plus per-hour rates over real time played.
#[get("/api/tower/rates")]
async fn api_rates(state: StoreState, query: Query<UserQuery>) -> HttpResponse {
    match runs_of(&state, query.user()) {
        Ok(runs) => {
            let totals = calculate_totals(&runs);
            let rates = calculate_rates(&totals);
            HttpResponse::Ok().json(serde_json::json!({ "totals": totals, "rates": rates }))
        }
        Err(resp) => resp,
    }
}
