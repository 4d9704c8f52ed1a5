//! In-memory fakes for the ports, shared by unit tests.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;

use crate::{
    domain::{Article, ChatId, MessageId, MessageRef, Subscriber, UserId},
    errors::Error,
    feed::{FeedError, NewsFeed},
    messaging::{
        port::MessagingPort,
        types::{DeliveryError, InlineKeyboard},
    },
    store::SubscriberStore,
    Result,
};

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<Vec<Subscriber>>,
    fail: AtomicBool,
}

impl FakeStore {
    pub fn with_ids(ids: &[i64]) -> Self {
        let store = Self::default();
        {
            let mut rows = store.rows.lock().unwrap();
            for id in ids {
                rows.push(Subscriber {
                    user_id: UserId(*id),
                    username: None,
                });
            }
        }
        store
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Store("database is locked".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SubscriberStore for FakeStore {
    async fn register(&self, user_id: UserId, username: Option<&str>) -> Result<()> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        if !rows.iter().any(|r| r.user_id == user_id) {
            rows.push(Subscriber {
                user_id,
                username: username.map(str::to_string),
            });
        }
        Ok(())
    }

    async fn list_identities(&self) -> Result<Vec<UserId>> {
        self.check()?;
        Ok(self.rows.lock().unwrap().iter().map(|r| r.user_id).collect())
    }

    async fn get(&self, user_id: UserId) -> Result<Option<Subscriber>> {
        self.check()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id)
            .cloned())
    }
}

/// Feed that returns a fixed outcome and counts calls.
pub struct FakeFeed {
    outcome: std::result::Result<Article, FeedError>,
    calls: AtomicUsize,
}

impl FakeFeed {
    pub fn ok(article: Article) -> Self {
        Self {
            outcome: Ok(article),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(err: FeedError) -> Self {
        Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsFeed for FakeFeed {
    async fn try_fetch(&self) -> std::result::Result<Article, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Messenger that records every call and fails or hangs for chosen chats.
#[derive(Default)]
pub struct FakeMessenger {
    failures: HashMap<i64, DeliveryError>,
    hanging: HashSet<i64>,
    sends: Mutex<Vec<(ChatId, String)>>,
    edits: Mutex<Vec<(MessageRef, String)>>,
    keyboards: Mutex<Vec<(ChatId, String, InlineKeyboard)>>,
    answered: Mutex<Vec<String>>,
    next_id: Mutex<i32>,
}

impl FakeMessenger {
    pub fn failing_for(mut self, chat_id: i64, err: DeliveryError) -> Self {
        self.failures.insert(chat_id, err);
        self
    }

    pub fn hanging_for(mut self, chat_id: i64) -> Self {
        self.hanging.insert(chat_id);
        self
    }

    fn alloc(&self, chat_id: ChatId) -> MessageRef {
        let mut guard = self.next_id.lock().unwrap();
        *guard += 1;
        MessageRef {
            chat_id,
            message_id: MessageId(*guard),
        }
    }

    pub fn sends(&self) -> Vec<(ChatId, String)> {
        self.sends.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<(MessageRef, String)> {
        self.edits.lock().unwrap().clone()
    }

    pub fn keyboards(&self) -> Vec<(ChatId, String, InlineKeyboard)> {
        self.keyboards.lock().unwrap().clone()
    }

    pub fn answered(&self) -> Vec<String> {
        self.answered.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessagingPort for FakeMessenger {
    async fn send_html(
        &self,
        chat_id: ChatId,
        html: &str,
    ) -> std::result::Result<MessageRef, DeliveryError> {
        self.sends.lock().unwrap().push((chat_id, html.to_string()));
        if self.hanging.contains(&chat_id.0) {
            std::future::pending::<()>().await;
        }
        if let Some(err) = self.failures.get(&chat_id.0) {
            return Err(err.clone());
        }
        Ok(self.alloc(chat_id))
    }

    async fn edit_html(
        &self,
        msg: MessageRef,
        html: &str,
    ) -> std::result::Result<(), DeliveryError> {
        self.edits.lock().unwrap().push((msg, html.to_string()));
        Ok(())
    }

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> std::result::Result<MessageRef, DeliveryError> {
        self.keyboards
            .lock()
            .unwrap()
            .push((chat_id, html.to_string(), keyboard));
        Ok(self.alloc(chat_id))
    }

    async fn answer_callback_query(
        &self,
        callback_id: &str,
    ) -> std::result::Result<(), DeliveryError> {
        self.answered.lock().unwrap().push(callback_id.to_string());
        Ok(())
    }
}
