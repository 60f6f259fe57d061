//! Content hub: cached Reddit feed and merged YouTube uploads.

use super::{error_response, ConfigState, HubState};
use crate::feed::{is_valid_subreddit, FeedError, DEFAULT_FEED_LIMIT};
use crate::models::StatsError;
use actix_web::{get, post, web::Query, HttpResponse};
use serde::Deserialize;

#[derive(Deserialize)]
struct FeedQuery {
    #[serde(default)]
    subreddit: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

impl FeedQuery {
    /// Requested (or configured) subreddit, checked before it reaches the upstream URL.
    fn subreddit<'a>(&'a self, config: &'a ConfigState) -> Result<&'a str, StatsError> {
        let name = self
            .subreddit
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&config.subreddit);
        if is_valid_subreddit(name) {
            Ok(name)
        } else {
            Err(StatsError::InvalidSubreddit(name.to_string()))
        }
    }
}

fn feed_error(e: &FeedError) -> HttpResponse {
    log::warn!("Content feed failed: {}", e);
    let body = serde_json::json!({ "success": false, "error": e.to_string() });
    match e {
        FeedError::Lock => HttpResponse::InternalServerError().json(body),
        FeedError::InvalidSubreddit(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

#[get("/api/content/reddit")]
async fn api_reddit(hub: HubState, config: ConfigState, query: Query<FeedQuery>) -> HttpResponse {
    let subreddit = match query.subreddit(&config) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    match hub.reddit(subreddit, limit, false).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => feed_error(&e),
    }
}

/// Refetch now, ignoring any cached copy.
#[post("/api/content/reddit/refresh")]
async fn api_reddit_refresh(
    hub: HubState,
    config: ConfigState,
    query: Query<FeedQuery>,
) -> HttpResponse {
    let subreddit = match query.subreddit(&config) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let limit = query.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    log::info!("Refreshing r/{}", subreddit);
    match hub.reddit(subreddit, limit, true).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => feed_error(&e),
    }
}

#[get("/api/videos")]
async fn api_videos(hub: HubState) -> HttpResponse {
    match hub.videos(false).await {
        Ok(page) => HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": page })),
        Err(e) => feed_error(&e),
    }
}

#[post("/api/videos/refresh")]
async fn api_videos_refresh(hub: HubState) -> HttpResponse {
    log::info!("Refreshing YouTube videos");
    match hub.videos(true).await {
        Ok(page) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "message": "Videos refreshed successfully",
            "data": page,
        })),
        Err(e) => feed_error(&e),
    }
}
