//! YouTube uploads from each configured channel's Atom feed.

use super::FeedError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::task::JoinSet;

/// Newest entries kept from each channel's feed.
pub const VIDEOS_PER_CHANNEL: usize = 10;
/// Newest videos kept after merging all channels.
pub const MAX_VIDEOS: usize = 50;

/// A creator whose uploads appear in the content hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YoutubeChannel {
    pub name: String,
    pub channel_id: String,
    /// Accent colour the dashboard uses for the channel's cards.
    #[serde(default)]
    pub color: Option<String>,
}

impl YoutubeChannel {
    pub fn new(name: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel_id: channel_id.into(),
            color: None,
        }
    }
}

/// One upload as shown in the content hub.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoItem {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub channel_color: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub thumbnail: String,
    pub description: String,
    pub url: String,
    pub author: String,
}

#[derive(Deserialize)]
struct AtomFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<AtomEntry>,
}

#[derive(Deserialize)]
struct AtomEntry {
    #[serde(rename = "videoId", alias = "yt:videoId", default)]
    video_id: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<AtomLink>,
    #[serde(default)]
    author: Option<AtomAuthor>,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "group", alias = "media:group", default)]
    media: Option<MediaGroup>,
}

#[derive(Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: String,
}

#[derive(Deserialize)]
struct AtomAuthor {
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct MediaGroup {
    #[serde(rename = "description", alias = "media:description", default)]
    description: String,
}

fn video_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)")
            .expect("valid video id regex")
    })
}

/// Video id from a watch or short link.
pub fn video_id_from_url(url: &str) -> Option<&str> {
    video_id_re()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

impl AtomEntry {
    fn into_video(self, channel: &YoutubeChannel) -> Option<VideoItem> {
        let href = self.link.map(|l| l.href);
        let id = match self.video_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => video_id_from_url(href.as_deref()?)?.to_string(),
        };
        let title = if self.title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            self.title
        };
        Some(VideoItem {
            thumbnail: format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", id),
            url: href.unwrap_or_else(|| format!("https://www.youtube.com/watch?v={}", id)),
            title,
            channel: channel.name.clone(),
            channel_color: channel.color.clone(),
            published_at: self
                .published
                .as_deref()
                .and_then(|p| DateTime::parse_from_rfc3339(p.trim()).ok())
                .map(|d| d.with_timezone(&Utc)),
            description: self.media.map(|m| m.description).unwrap_or_default(),
            author: self
                .author
                .map(|a| a.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| channel.name.clone()),
            id,
        })
    }
}

/// Map one channel's Atom document to its newest videos, in feed order.
pub fn parse_youtube_feed(
    body: &str,
    channel: &YoutubeChannel,
) -> Result<Vec<VideoItem>, quick_xml::DeError> {
    let feed: AtomFeed = quick_xml::de::from_str(body)?;
    Ok(feed
        .entries
        .into_iter()
        .take(VIDEOS_PER_CHANNEL)
        .filter_map(|e| e.into_video(channel))
        .collect())
}

/// Merge per-channel videos: newest first, undated last, capped at `MAX_VIDEOS`.
pub fn merge_videos(mut videos: Vec<VideoItem>) -> Vec<VideoItem> {
    videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    videos.truncate(MAX_VIDEOS);
    videos
}

/// Fetches the configured channels' feeds.
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    channels: Vec<YoutubeChannel>,
}

impl YoutubeClient {
    pub fn new(user_agent: &str, channels: Vec<YoutubeChannel>) -> Result<Self, FeedError> {
        Self::with_base_url(user_agent, "https://www.youtube.com", channels)
    }

    /// Client against another host serving `/feeds/videos.xml?channel_id=`.
    pub fn with_base_url(
        user_agent: &str,
        base_url: &str,
        channels: Vec<YoutubeChannel>,
    ) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            channels,
        })
    }

    pub fn channels(&self) -> &[YoutubeChannel] {
        &self.channels
    }

    /// Fetch every channel concurrently. A channel that fails is logged and left out.
    pub async fn fetch_all(&self) -> Vec<VideoItem> {
        let mut tasks = JoinSet::new();
        for channel in self.channels.iter().cloned() {
            let http = self.http.clone();
            let url = format!(
                "{}/feeds/videos.xml?channel_id={}",
                self.base_url, channel.channel_id
            );
            tasks.spawn(async move {
                let result = fetch_channel(&http, &url, &channel).await;
                (channel, result)
            });
        }

        let mut videos = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(items))) => videos.extend(items),
                Ok((channel, Err(e))) => {
                    log::warn!("Skipping YouTube channel {}: {}", channel.name, e)
                }
                Err(e) => log::warn!("YouTube fetch task failed: {}", e),
            }
        }
        log::info!(
            "Fetched {} video(s) from {} channel(s)",
            videos.len(),
            self.channels.len()
        );
        merge_videos(videos)
    }
}

async fn fetch_channel(
    http: &reqwest::Client,
    url: &str,
    channel: &YoutubeChannel,
) -> Result<Vec<VideoItem>, FeedError> {
    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FeedError::Status(response.status().as_u16()));
    }
    let body = response.text().await?;
    parse_youtube_feed(&body, channel).map_err(FeedError::Xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/" xmlns="http://www.w3.org/2005/Atom">
 <link rel="self" href="http://www.youtube.com/feeds/videos.xml?channel_id=UCabc"/>
 <id>yt:channel:UCabc</id>
 <yt:channelId>UCabc</yt:channelId>
 <title>GreenyTower</title>
 <link rel="alternate" href="https://www.youtube.com/channel/UCabc"/>
 <author>
  <name>GreenyTower</name>
  <uri>https://www.youtube.com/channel/UCabc</uri>
 </author>
 <published>2020-01-01T00:00:00+00:00</published>
 <entry>
  <id>yt:video:vid00000001</id>
  <yt:videoId>vid00000001</yt:videoId>
  <yt:channelId>UCabc</yt:channelId>
  <title>Tier 14 farming guide</title>
  <link rel="alternate" href="https://www.youtube.com/watch?v=vid00000001"/>
  <author>
   <name>GreenyTower</name>
   <uri>https://www.youtube.com/channel/UCabc</uri>
  </author>
  <published>2025-01-10T12:00:00+00:00</published>
  <updated>2025-01-10T13:00:00+00:00</updated>
  <media:group>
   <media:title>Tier 14 farming guide</media:title>
   <media:content url="https://www.youtube.com/v/vid00000001?version=3" type="application/x-shockwave-flash" width="640" height="390"/>
   <media:thumbnail url="https://i1.ytimg.com/vi/vid00000001/hqdefault.jpg" width="480" height="360"/>
   <media:description>Coins per hour at T14.</media:description>
  </media:group>
 </entry>
 <entry>
  <id>yt:video:vid00000002</id>
  <title></title>
  <link rel="alternate" href="https://youtu.be/vid00000002"/>
  <published>2025-01-09T12:00:00+00:00</published>
 </entry>
</feed>"#;

    fn channel() -> YoutubeChannel {
        YoutubeChannel {
            name: "GreenyTower".to_string(),
            channel_id: "UCabc".to_string(),
            color: Some("#4CAF50".to_string()),
        }
    }

    #[test]
    fn parses_atom_entries() {
        let videos = parse_youtube_feed(FEED, &channel()).unwrap();
        assert_eq!(videos.len(), 2);

        let first = &videos[0];
        assert_eq!(first.id, "vid00000001");
        assert_eq!(first.title, "Tier 14 farming guide");
        assert_eq!(first.url, "https://www.youtube.com/watch?v=vid00000001");
        assert_eq!(first.channel, "GreenyTower");
        assert_eq!(first.channel_color.as_deref(), Some("#4CAF50"));
        assert_eq!(first.description, "Coins per hour at T14.");
        assert_eq!(
            first.thumbnail,
            "https://img.youtube.com/vi/vid00000001/maxresdefault.jpg"
        );
        assert!(first.published_at > videos[1].published_at);

        // No videoId element: id comes from the short link.
        assert_eq!(videos[1].id, "vid00000002");
        assert_eq!(videos[1].title, "Untitled");
        assert_eq!(videos[1].author, "GreenyTower");
        assert_eq!(videos[1].description, "");
    }

    #[test]
    fn video_ids_from_links() {
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=abc_DEF-123&t=4"),
            Some("abc_DEF-123")
        );
        assert_eq!(video_id_from_url("https://youtu.be/xyz"), Some("xyz"));
        assert_eq!(video_id_from_url("https://example.com/watch"), None);
    }

    #[test]
    fn merge_sorts_newest_first_and_caps() {
        let base = DateTime::parse_from_rfc3339("2025-01-01T00:00:00+00:00")
            .unwrap()
            .with_timezone(&Utc);
        let mut videos: Vec<VideoItem> = (0..60)
            .map(|i| VideoItem {
                id: format!("v{i}"),
                title: String::new(),
                channel: String::new(),
                channel_color: None,
                published_at: Some(base + chrono::Duration::hours(i)),
                thumbnail: String::new(),
                description: String::new(),
                url: String::new(),
                author: String::new(),
            })
            .collect();
        videos[0].published_at = None;

        let merged = merge_videos(videos);
        assert_eq!(merged.len(), MAX_VIDEOS);
        assert_eq!(merged[0].id, "v59");
        assert!(merged.iter().all(|v| v.published_at.is_some()));
    }
}
