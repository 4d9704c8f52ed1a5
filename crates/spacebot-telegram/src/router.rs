use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use spacebot_core::{
    broadcast::BroadcastJob,
    config::Config,
    feed::NewsFeed,
    interactions::Interactions,
    messaging::port::MessagingPort,
    scheduler::{BroadcastScheduler, DailySchedule},
    store::SubscriberStore,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub interactions: Arc<Interactions>,
}

/// Run the bot until Ctrl-C: long-poll updates and fire the daily broadcast.
pub async fn run_polling(
    cfg: Arc<Config>,
    store: Arc<dyn SubscriberStore>,
    feed: Arc<dyn NewsFeed>,
) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "bot started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed"),
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let job = Arc::new(BroadcastJob::new(
        store.clone(),
        feed.clone(),
        messenger.clone(),
        cfg.send_timeout,
    ));
    let scheduler = BroadcastScheduler::new(
        DailySchedule::new(cfg.broadcast_time, cfg.broadcast_utc_offset),
        job,
    );
    scheduler.start().await;

    let state = Arc::new(AppState {
        interactions: Arc::new(Interactions::new(
            store,
            feed,
            messenger,
            cfg.about_text.clone(),
        )),
    });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("dispatcher stopped, cancelling daily broadcast");
    scheduler.stop().await;

    Ok(())
}
