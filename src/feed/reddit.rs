//! Reddit posts from the public JSON listing.

use super::FeedError;
use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

/// One post as shown in the content hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub score: i64,
    pub num_comments: u64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Deserialize)]
struct ListingChild {
    data: RedditPost,
}

#[derive(Deserialize)]
struct RedditPost {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    created_utc: Option<f64>,
}

impl From<RedditPost> for FeedItem {
    fn from(post: RedditPost) -> Self {
        // Reddit uses placeholder words instead of URLs for text posts.
        let thumbnail = post.thumbnail.filter(|t| t.starts_with("http"));
        Self {
            url: format!("https://reddit.com{}", post.permalink),
            id: post.id,
            title: post.title,
            author: post.author,
            thumbnail,
            score: post.score,
            num_comments: post.num_comments,
            created_at: post
                .created_utc
                .and_then(|ts| Utc.timestamp_opt(ts as i64, 0).single()),
        }
    }
}

/// Map a Reddit listing document to feed items.
pub fn parse_reddit_listing(body: &str) -> Result<Vec<FeedItem>, serde_json::Error> {
    let listing: Listing = serde_json::from_str(body)?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|c| c.data.into())
        .collect())
}

fn subreddit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{2,21}$").expect("valid subreddit regex"))
}

/// Subreddit names are 2-21 letters, digits or underscores.
pub fn is_valid_subreddit(name: &str) -> bool {
    subreddit_re().is_match(name)
}

/// Thin client for the public Reddit JSON listing.
pub struct RedditClient {
    http: reqwest::Client,
    base_url: String,
}

impl RedditClient {
    pub fn new(user_agent: &str) -> Result<Self, FeedError> {
        Self::with_base_url(user_agent, "https://www.reddit.com")
    }

    /// Client against another host serving the same `/r/{sub}.json` listing.
    pub fn with_base_url(user_agent: &str, base_url: &str) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch(&self, subreddit: &str, limit: usize) -> Result<Vec<FeedItem>, FeedError> {
        if !is_valid_subreddit(subreddit) {
            return Err(FeedError::InvalidSubreddit(subreddit.to_string()));
        }
        let url = format!("{}/r/{}.json?limit={}", self.base_url, subreddit, limit);
        log::info!("Fetching r/{} (limit {})", subreddit, limit);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }
        let body = response.text().await?;
        parse_reddit_listing(&body).map_err(FeedError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "children": [
                {"kind": "t3", "data": {
                    "id": "abc123",
                    "title": "New wave record at T14",
                    "author": "towerfan",
                    "permalink": "/r/TheTowerGame/comments/abc123/new_wave_record/",
                    "thumbnail": "self",
                    "score": 42,
                    "num_comments": 7,
                    "created_utc": 1700000000.0
                }},
                {"kind": "t3", "data": {
                    "id": "def456",
                    "title": "Lab priorities?",
                    "author": "newbie",
                    "permalink": "/r/TheTowerGame/comments/def456/lab_priorities/",
                    "thumbnail": "https://b.thumbs.redditmedia.com/x.jpg",
                    "score": 3,
                    "num_comments": 12
                }}
            ]
        }
    }"#;

    #[test]
    fn parses_listing_and_drops_placeholder_thumbnails() {
        let items = parse_reddit_listing(LISTING).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "abc123");
        assert_eq!(
            items[0].url,
            "https://reddit.com/r/TheTowerGame/comments/abc123/new_wave_record/"
        );
        assert_eq!(items[0].thumbnail, None);
        assert!(items[0].created_at.is_some());
        assert_eq!(
            items[1].thumbnail.as_deref(),
            Some("https://b.thumbs.redditmedia.com/x.jpg")
        );
        assert_eq!(items[1].created_at, None);
    }

    #[test]
    fn subreddit_names() {
        assert!(is_valid_subreddit("TheTowerGame"));
        assert!(is_valid_subreddit("rust_2024"));
        assert!(!is_valid_subreddit("x"));
        assert!(!is_valid_subreddit("x.json?after=t3_abc&"));
        assert!(!is_valid_subreddit("a/../b"));
        assert!(!is_valid_subreddit(&"a".repeat(22)));
    }
}
