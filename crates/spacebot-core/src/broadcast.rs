//! Daily digest delivery.
//!
//! One cycle = one feed fetch, one subscriber enumeration, then exactly one
//! delivery attempt per subscriber. Delivery failures stay with the recipient
//! they happened to: they are dropped without retry and never stop the loop.
//! Only a failed enumeration aborts a cycle.

use std::{sync::Arc, time::Duration};

use crate::{
    domain::{ChatId, UserId},
    feed::NewsFeed,
    formatting::digest_html,
    messaging::{port::MessagingPort, types::DeliveryError},
    store::SubscriberStore,
    Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Delivery attempts made; one per enumerated subscriber.
    pub attempted: usize,
}

pub struct BroadcastJob {
    store: Arc<dyn SubscriberStore>,
    feed: Arc<dyn NewsFeed>,
    messenger: Arc<dyn MessagingPort>,
    send_timeout: Duration,
}

impl BroadcastJob {
    pub fn new(
        store: Arc<dyn SubscriberStore>,
        feed: Arc<dyn NewsFeed>,
        messenger: Arc<dyn MessagingPort>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            store,
            feed,
            messenger,
            send_timeout,
        }
    }

    pub async fn run_cycle(&self) -> Result<CycleReport> {
        let article = self.feed.fetch_latest().await;
        let recipients = self.store.list_identities().await?;

        let html = digest_html(&article);
        for user_id in &recipients {
            let _ = self.deliver(*user_id, &html).await;
        }

        Ok(CycleReport {
            attempted: recipients.len(),
        })
    }

    async fn deliver(&self, user_id: UserId, html: &str) -> std::result::Result<(), DeliveryError> {
        let send = self.messenger.send_html(ChatId::from(user_id), html);
        match tokio::time::timeout(self.send_timeout, send).await {
            Ok(res) => res.map(|_| ()),
            Err(_) => Err(DeliveryError::TimedOut),
        }
    }
}
