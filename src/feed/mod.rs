//! Content hub: Reddit posts and YouTube uploads fetched over HTTP and served through TTL caches.

mod reddit;
mod youtube;

pub use reddit::{is_valid_subreddit, parse_reddit_listing, FeedItem, RedditClient};
pub use youtube::{
    merge_videos, parse_youtube_feed, video_id_from_url, VideoItem, YoutubeChannel,
    YoutubeClient, MAX_VIDEOS, VIDEOS_PER_CHANNEL,
};

use crate::cache::TtlCache;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::RwLock;
use std::time::Duration;

/// Posts fetched per refresh; requests are served as slices of this.
pub const MAX_FEED_ITEMS: usize = 100;
pub const DEFAULT_FEED_LIMIT: usize = 25;

#[derive(Debug)]
pub enum FeedError {
    Http(reqwest::Error),
    /// Upstream answered with a non-success status.
    Status(u16),
    /// Body was not a Reddit listing.
    Decode(serde_json::Error),
    /// Body was not an Atom feed.
    Xml(quick_xml::DeError),
    InvalidSubreddit(String),
    Lock,
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Http(e) => write!(f, "Feed request failed: {}", e),
            FeedError::Status(code) => write!(f, "Feed upstream returned status {}", code),
            FeedError::Decode(e) => write!(f, "Feed response was not a listing: {}", e),
            FeedError::Xml(e) => write!(f, "Feed response was not an Atom feed: {}", e),
            FeedError::InvalidSubreddit(name) => write!(f, "Invalid subreddit name '{}'", name),
            FeedError::Lock => write!(f, "lock error"),
        }
    }
}

impl std::error::Error for FeedError {}

impl From<reqwest::Error> for FeedError {
    fn from(e: reqwest::Error) -> Self {
        FeedError::Http(e)
    }
}

/// A slice of a subreddit feed plus whether it came from cache.
#[derive(Clone, Debug, Serialize)]
pub struct FeedPage {
    pub subreddit: String,
    pub items: Vec<FeedItem>,
    pub count: usize,
    pub cached: bool,
}

/// Merged uploads of all configured channels.
#[derive(Clone, Debug, Serialize)]
pub struct VideoPage {
    pub videos: Vec<VideoItem>,
    pub last_update: DateTime<Utc>,
    pub total_videos: usize,
    pub total_channels: usize,
    pub cached: bool,
}

#[derive(Clone)]
struct VideoSnapshot {
    videos: Vec<VideoItem>,
    fetched_at: DateTime<Utc>,
}

/// Per-subreddit feeds and the merged video list, each behind a TTL cache.
pub struct ContentHub {
    reddit: RedditClient,
    youtube: YoutubeClient,
    posts: RwLock<TtlCache<String, Vec<FeedItem>>>,
    videos: RwLock<TtlCache<(), VideoSnapshot>>,
}

impl ContentHub {
    pub fn new(reddit: RedditClient, youtube: YoutubeClient, max_age: Duration) -> Self {
        Self {
            reddit,
            youtube,
            posts: RwLock::new(TtlCache::new(max_age)),
            videos: RwLock::new(TtlCache::new(max_age)),
        }
    }

    /// Serve from cache while fresh; otherwise (or when `force`) refetch.
    pub async fn reddit(
        &self,
        subreddit: &str,
        limit: usize,
        force: bool,
    ) -> Result<FeedPage, FeedError> {
        let key = subreddit.to_lowercase();
        let limit = limit.clamp(1, MAX_FEED_ITEMS);

        if !force {
            let cache = self.posts.read().map_err(|_| FeedError::Lock)?;
            if let Some(items) = cache.get(&key) {
                log::debug!("Serving {} posts for r/{} from cache", items.len(), subreddit);
                return Ok(page(subreddit, items, limit, true));
            }
        }

        let items = self.reddit.fetch(subreddit, MAX_FEED_ITEMS).await?;
        let result = page(subreddit, &items, limit, false);
        self.posts
            .write()
            .map_err(|_| FeedError::Lock)?
            .insert(key, items);
        Ok(result)
    }

    /// Newest uploads across all channels; cached like the Reddit feeds.
    ///
    /// An empty fetch (every channel failed) is returned but not cached.
    pub async fn videos(&self, force: bool) -> Result<VideoPage, FeedError> {
        let total_channels = self.youtube.channels().len();
        if !force {
            let cache = self.videos.read().map_err(|_| FeedError::Lock)?;
            if let Some(snapshot) = cache.get(&()) {
                log::debug!("Serving {} videos from cache", snapshot.videos.len());
                return Ok(video_page(snapshot.clone(), total_channels, true));
            }
        }

        let snapshot = VideoSnapshot {
            videos: self.youtube.fetch_all().await,
            fetched_at: Utc::now(),
        };
        if !snapshot.videos.is_empty() {
            self.videos
                .write()
                .map_err(|_| FeedError::Lock)?
                .insert((), snapshot.clone());
        }
        Ok(video_page(snapshot, total_channels, false))
    }

    /// Drop expired feeds; returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let posts = match self.posts.write() {
            Ok(mut cache) => cache.purge_expired(),
            Err(_) => 0,
        };
        let videos = match self.videos.write() {
            Ok(mut cache) => cache.purge_expired(),
            Err(_) => 0,
        };
        posts + videos
    }
}

fn page(subreddit: &str, items: &[FeedItem], limit: usize, cached: bool) -> FeedPage {
    let items: Vec<FeedItem> = items.iter().take(limit).cloned().collect();
    FeedPage {
        subreddit: subreddit.to_string(),
        count: items.len(),
        items,
        cached,
    }
}

fn video_page(snapshot: VideoSnapshot, total_channels: usize, cached: bool) -> VideoPage {
    VideoPage {
        total_videos: snapshot.videos.len(),
        videos: snapshot.videos,
        last_update: snapshot.fetched_at,
        total_channels,
        cached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> FeedItem {
        FeedItem {
            id: id.to_string(),
            title: String::new(),
            author: String::new(),
            url: String::new(),
            thumbnail: None,
            score: 0,
            num_comments: 0,
            created_at: None,
        }
    }

    #[test]
    fn page_respects_limit() {
        let items = vec![item("a"), item("b")];
        let p = page("TheTowerGame", &items, 1, true);
        assert_eq!(p.count, 1);
        assert_eq!(p.items[0].id, "a");
        assert!(p.cached);
    }
}
