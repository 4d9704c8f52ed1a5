//! `/start` and button handling, independent of the chat platform.

use std::sync::Arc;

use crate::{
    domain::{ChatId, MessageRef, StartRequest},
    feed::NewsFeed,
    formatting::{escape_html, greeting_html, news_reply_html},
    messaging::{
        port::MessagingPort,
        types::{InlineButton, InlineKeyboard},
    },
    store::SubscriberStore,
    Result,
};

pub const START_FAILED_TEXT: &str = "⚠️ Sorry, something went wrong. Please try /start again.";

/// The closed set of button actions offered by the start keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    News,
    About,
}

impl Action {
    pub fn token(self) -> &'static str {
        match self {
            Action::News => "news",
            Action::About => "about",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "news" => Some(Action::News),
            "about" => Some(Action::About),
            _ => None,
        }
    }
}

/// Rendered response to an interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub html: String,
    pub keyboard: Option<InlineKeyboard>,
}

pub fn start_keyboard() -> InlineKeyboard {
    InlineKeyboard::single_row(vec![
        InlineButton::new("📰 Latest News", Action::News.token()),
        InlineButton::new("ℹ️ About", Action::About.token()),
    ])
}

pub struct Interactions {
    store: Arc<dyn SubscriberStore>,
    feed: Arc<dyn NewsFeed>,
    messenger: Arc<dyn MessagingPort>,
    about_text: String,
}

impl Interactions {
    pub fn new(
        store: Arc<dyn SubscriberStore>,
        feed: Arc<dyn NewsFeed>,
        messenger: Arc<dyn MessagingPort>,
        about_text: impl Into<String>,
    ) -> Self {
        Self {
            store,
            feed,
            messenger,
            about_text: about_text.into(),
        }
    }

    /// Register the user and build the greeting with the action keyboard.
    pub async fn on_start(&self, req: &StartRequest) -> Result<Reply> {
        self.store
            .register(req.user_id, req.username.as_deref())
            .await?;

        Ok(Reply {
            html: greeting_html(&req.first_name),
            keyboard: Some(start_keyboard()),
        })
    }

    /// `None` for tokens outside the closed action set.
    pub async fn on_action_selected(&self, token: &str) -> Option<Reply> {
        let html = match Action::parse(token)? {
            Action::News => news_reply_html(&self.feed.fetch_latest().await),
            Action::About => escape_html(&self.about_text),
        };
        Some(Reply {
            html,
            keyboard: None,
        })
    }

    /// Handle `/start` end to end: reply with the keyboard, or a generic
    /// failure text when registration did not go through.
    pub async fn start(&self, chat_id: ChatId, req: &StartRequest) -> Result<()> {
        match self.on_start(req).await {
            Ok(reply) => {
                let keyboard = reply.keyboard.unwrap_or_else(start_keyboard);
                self.messenger
                    .send_inline_keyboard(chat_id, &reply.html, keyboard)
                    .await?;
            }
            Err(e) => {
                tracing::error!(user_id = req.user_id.0, error = %e, "registration failed");
                self.messenger.send_html(chat_id, START_FAILED_TEXT).await?;
            }
        }
        Ok(())
    }

    /// Handle a button press: acknowledge it, then edit the originating
    /// message in place with the selected content.
    pub async fn action_selected(
        &self,
        callback_id: &str,
        message: Option<MessageRef>,
        token: &str,
    ) -> Result<()> {
        if let Err(e) = self.messenger.answer_callback_query(callback_id).await {
            tracing::debug!(error = %e, "answer_callback_query failed");
        }

        let Some(message) = message else {
            return Ok(());
        };
        let Some(reply) = self.on_action_selected(token).await else {
            tracing::debug!(token, "ignoring unknown callback token");
            return Ok(());
        };

        self.messenger.edit_html(message, &reply.html).await?;
        Ok(())
    }
}
