//! Tower run stats tracker: library with parsers, analytics, the data store, and the REST API.

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;
pub mod logic;
pub mod models;
pub mod parse;
pub mod store;

pub use config::Config;
pub use feed::{
    ContentHub, FeedError, FeedItem, RedditClient, VideoItem, YoutubeChannel, YoutubeClient,
};
pub use logic::{
    analyze_bracket_difficulty, calculate_rates, calculate_totals, lab_priorities, league_stats,
    progress, stats_summary, tier_distribution, DifficultyAnalysis, DifficultyLabel, LabFocus,
    ProgressMetric, SubmitRun,
};
pub use models::{
    Bracket, BracketPlayer, Run, RunCategory, RunId, RunStats, StatValue, StatsError,
    TournamentResult, UserLabs,
};
pub use parse::{parse_game_time, parse_number, parse_stats_text, parse_tournament_csv};
pub use store::Store;
