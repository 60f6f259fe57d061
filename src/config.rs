//! Server settings from environment variables; missing or unparseable values use the defaults.

use crate::feed::YoutubeChannel;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Subreddit the content hub shows when none is requested.
    pub subreddit: String,
    pub content_cache_ttl: Duration,
    pub cache_sweep_interval: Duration,
    pub feed_user_agent: String,
    /// Channels whose uploads the content hub merges.
    pub youtube_channels: Vec<YoutubeChannel>,
}

/// Name, channel id and card colour of the creators shown by default.
const DEFAULT_CHANNELS: &[(&str, &str, &str)] = &[
    ("GreenyTower", "UCeuO60YTS9WwOl1yAi6Qn9Q", "#4CAF50"),
    ("CrowbarZero", "UCWtEZ--dMr3lUlRG8rrvRsg", "#FF5722"),
    ("AllClouded", "UCcpn3WSlVU5IRs7SPiuozjQ", "#2196F3"),
    ("SpartanTheTower", "UCJltNBPDx7H9LH0csP5ELXQ", "#9C27B0"),
    ("Taggzrd", "UCybEHrV8WZ0RGyRQbM-MZEA", "#FF9800"),
    ("JPlays1", "UCOtehYd4CVXI7BPJw2UfSOg", "#795548"),
    ("JeffP978", "UCQTs9ZTFsUCGlorb9OWJHvQ", "#607D8B"),
    ("EthanDX", "UC6cbwoNCQ4FhTJhXGg3Vy3A", "#E91E63"),
    ("FungulusMaximus", "UC98T7zt-DiGj0mIPBYQu88g", "#8BC34A"),
    ("TequilaMan7", "UC6M_dnTgqG_4mqNHoq_if1w", "#FFC107"),
    ("DizzyProjectRend", "UC5NwLlR639GehQxq9ulDNxQ", "#00BCD4"),
    ("Noobodytest", "UCgUKiyX42qmzoCpNHIluKpw", "#673AB7"),
    ("PrimosTower", "UCE66fvcWg0QxyEBwVpKrjtg", "#3F51B5"),
    ("LyconaGaming", "UCgajZWXHKq-xSu42X_tX30A", "#FF5722"),
    ("AnornaSharnath", "UC_6K5wzi9_gmCYu-OZbNwcg", "#FF6B6B"),
    ("ShadoSabre", "UC0tjziI8zi7XZaj69FJaisQ", "#1A1A2E"),
    ("1234bruhTheTower", "UCG_siFCi2PkOXeSprGI1vXg", "#9E9E9E"),
    ("jamn4evr", "UCvoytBFsFuIzBgtUrNdYKpw", "#FF6B35"),
];

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_subreddit() -> String {
    "TheTowerGame".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    30 * 60
}

fn default_sweep_interval_secs() -> u64 {
    10 * 60
}

fn default_user_agent() -> String {
    format!("tower-stats-web/{}", env!("CARGO_PKG_VERSION"))
}

fn default_youtube_channels() -> Vec<YoutubeChannel> {
    DEFAULT_CHANNELS
        .iter()
        .map(|(name, id, color)| YoutubeChannel {
            name: name.to_string(),
            channel_id: id.to_string(),
            color: Some(color.to_string()),
        })
        .collect()
}

/// `Name=ChannelId,Name=ChannelId`; malformed entries are skipped.
pub fn parse_channel_list(raw: &str) -> Vec<YoutubeChannel> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| match entry.split_once('=') {
            Some((name, id)) if !name.trim().is_empty() && !id.trim().is_empty() => {
                Some(YoutubeChannel::new(name.trim(), id.trim()))
            }
            _ => {
                log::warn!("Ignoring YouTube channel entry '{}'", entry);
                None
            }
        })
        .collect()
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| default_host()),
            port: env_parsed("PORT").unwrap_or_else(default_port),
            subreddit: std::env::var("REDDIT_SUBREDDIT").unwrap_or_else(|_| default_subreddit()),
            content_cache_ttl: Duration::from_secs(
                env_parsed("CONTENT_CACHE_TTL_SECS").unwrap_or_else(default_cache_ttl_secs),
            ),
            cache_sweep_interval: Duration::from_secs(
                env_parsed::<u64>("CACHE_SWEEP_INTERVAL_SECS")
                    .unwrap_or_else(default_sweep_interval_secs)
                    .max(1),
            ),
            feed_user_agent: std::env::var("FEED_USER_AGENT")
                .unwrap_or_else(|_| default_user_agent()),
            youtube_channels: std::env::var("YOUTUBE_CHANNELS")
                .map(|raw| parse_channel_list(&raw))
                .unwrap_or_else(|_| default_youtube_channels()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            subreddit: default_subreddit(),
            content_cache_ttl: Duration::from_secs(default_cache_ttl_secs()),
            cache_sweep_interval: Duration::from_secs(default_sweep_interval_secs()),
            feed_user_agent: default_user_agent(),
            youtube_channels: default_youtube_channels(),
        }
    }
}
