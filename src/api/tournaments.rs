//! Tournament result history imported from CSV.

use super::{error_response, read_store, write_store, StoreState, UserQuery};
use crate::models::StatsError;
use crate::parse::parse_tournament_csv;
use actix_web::{get, post, web::Query, HttpResponse};

#[post("/api/tower/tournaments/import")]
async fn api_import_tournaments(
    state: StoreState,
    query: Query<UserQuery>,
    body: String,
) -> HttpResponse {
    let user = match query.user() {
        Some(u) => u.to_string(),
        None => return error_response(&StatsError::MissingField("discord_user_id")),
    };
    let results = parse_tournament_csv(&body);
    if results.is_empty() {
        return error_response(&StatsError::EmptyInput);
    }
    let mut store = match write_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let imported = store.add_tournament_results(&user, results);
    log::info!("Imported {} tournament result(s) for {}", imported, user);
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "imported": imported }))
}

#[get("/api/tower/tournaments")]
async fn api_list_tournaments(state: StoreState, query: Query<UserQuery>) -> HttpResponse {
    let store = match read_store(&state) {
        Ok(g) => g,
        Err(resp) => return resp,
    };
    let results = query.user().map(|u| store.tournament_results(u)).unwrap_or(&[]);
    HttpResponse::Ok().json(serde_json::json!({ "results": results, "count": results.len() }))
}
