//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST, PORT, REDDIT_SUBREDDIT, CONTENT_CACHE_TTL_SECS,
//! CACHE_SWEEP_INTERVAL_SECS, FEED_USER_AGENT, YOUTUBE_CHANNELS (`Name=ChannelId,...`).

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use std::sync::RwLock;
use tower_stats_web::{api, Config, ContentHub, FeedError, RedditClient, Store, YoutubeClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    let to_io = |e: FeedError| std::io::Error::new(std::io::ErrorKind::Other, e.to_string());
    let reddit = RedditClient::new(&config.feed_user_agent).map_err(to_io)?;
    let youtube = YoutubeClient::new(&config.feed_user_agent, config.youtube_channels.clone())
        .map_err(to_io)?;
    log::info!("Content hub follows {} YouTube channel(s)", config.youtube_channels.len());
    let hub = Data::new(ContentHub::new(reddit, youtube, config.content_cache_ttl));
    let store = Data::new(RwLock::new(Store::new()));

    // Background task: drop expired feeds so stale subreddits don't pile up
    let hub_sweep = hub.clone();
    let sweep_every = config.cache_sweep_interval;
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(sweep_every);
        loop {
            interval.tick().await;
            let removed = hub_sweep.purge_expired();
            if removed > 0 {
                log::info!("Purged {} expired feed(s) from the content cache", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    let config = Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(hub.clone())
            .app_data(config.clone())
            .configure(api::configure)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}
