//! Saved lab levels and static upgrade advice.

use super::{error_response, read_store, write_store, StoreState};
use crate::logic::{lab_priorities, LabFocus};
use crate::models::UserLabs;
use actix_web::{
    get, post,
    web::{Json, Path, Query},
    HttpResponse,
};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
struct DiscordPath {
    discord_id: String,
}

/// Path segments: user and lab (e.g. /api/user-labs/{discord_id}/lab/{lab_name})
#[derive(Deserialize)]
struct LabPath {
    discord_id: String,
    lab_name: String,
}

#[derive(Deserialize)]
struct SaveLabsBody {
    #[serde(default)]
    labs: BTreeMap<String, u32>,
    #[serde(default)]
    tier: Option<u32>,
    #[serde(default)]
    wave: Option<u32>,
}

#[derive(Deserialize)]
struct FocusQuery {
    #[serde(default)]
    focus: Option<String>,
}

/// Saved labs, or an empty record when the user has none yet.
#[get("/api/user-labs/{discord_id}")]
async fn api_get_labs(state: StoreState, path: Path<DiscordPath>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    match store.labs(&path.discord_id) {
        Some(labs) => HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": labs })),
        None => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "data": UserLabs::new(path.discord_id.clone(), BTreeMap::new(), None, None),
        })),
    }
}

/// One lab's level; labs never saved read as 0.
#[get("/api/user-labs/{discord_id}/lab/{lab_name}")]
async fn api_get_lab_level(state: StoreState, path: Path<LabPath>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let level = store
        .labs(&path.discord_id)
        .map(|labs| labs.level(&path.lab_name))
        .unwrap_or(0);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "lab": path.lab_name,
        "level": level,
    }))
}

#[post("/api/user-labs/{discord_id}")]
async fn api_save_labs(
    state: StoreState,
    path: Path<DiscordPath>,
    body: Json<SaveLabsBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let labs = UserLabs::new(path.discord_id.clone(), body.labs, body.tier, body.wave);
    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let saved = store.upsert_labs(labs);
    log::info!("Saved {} lab level(s) for {}", saved.labs.len(), saved.discord_id);
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": saved }))
}

/// Next upgrade per lab in the focus, best improvement per hour first.
#[get("/api/user-labs/{discord_id}/recommendations")]
async fn api_lab_recommendations(
    state: StoreState,
    path: Path<DiscordPath>,
    query: Query<FocusQuery>,
) -> HttpResponse {
    let focus = match LabFocus::parse(query.focus.as_deref()) {
        Ok(f) => f,
        Err(e) => return error_response(&e),
    };
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let empty;
    let labs = match store.labs(&path.discord_id) {
        Some(l) => l,
        None => {
            empty = UserLabs::new(path.discord_id.clone(), BTreeMap::new(), None, None);
            &empty
        }
    };
    let recommendations = lab_priorities(labs, focus);
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "focus": focus,
        "current_tier": labs.tier,
        "current_wave": labs.wave,
        "recommendations": recommendations,
    }))
}
