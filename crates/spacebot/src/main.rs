use std::sync::Arc;

use spacebot_core::{
    config::Config,
    feed::{HttpFeedClient, NewsFeed},
    store::{SqliteSubscriberStore, SubscriberStore},
};

#[tokio::main]
async fn main() -> Result<(), spacebot_core::Error> {
    spacebot_core::logging::init("spacebot")?;

    let cfg = Arc::new(Config::load()?);
    tracing::info!(
        database = %cfg.database_path.display(),
        feed = %cfg.feed_url,
        broadcast_time = %cfg.broadcast_time,
        utc_offset = %cfg.broadcast_utc_offset,
        "configuration loaded"
    );

    let sqlite = Arc::new(SqliteSubscriberStore::open(&cfg.database_path).await?);
    let store: Arc<dyn SubscriberStore> = sqlite.clone();
    let feed: Arc<dyn NewsFeed> = Arc::new(HttpFeedClient::new(
        cfg.feed_url.clone(),
        cfg.feed_timeout,
    )?);

    let res = spacebot_telegram::router::run_polling(cfg, store, feed).await;

    sqlite.close().await;

    res.map_err(|e| spacebot_core::Error::External(format!("telegram bot failed: {e}")))?;

    Ok(())
}
