//! Telegram adapter (teloxide).
//!
//! This crate implements the `spacebot-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, ParseMode},
    ApiError, RequestError,
};

pub mod handlers;
pub mod router;

use spacebot_core::{
    domain::{ChatId, MessageId, MessageRef},
    messaging::{
        port::MessagingPort,
        types::{DeliveryError, InlineKeyboard},
    },
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }
}

/// Sort a Bot API failure into the reasons the core cares about.
pub fn classify_error(e: RequestError) -> DeliveryError {
    match e {
        RequestError::Api(ApiError::BotBlocked) => DeliveryError::Blocked,
        RequestError::Api(
            ApiError::ChatNotFound
            | ApiError::UserNotFound
            | ApiError::UserDeactivated
            | ApiError::BotKicked,
        ) => DeliveryError::RecipientGone,
        other => DeliveryError::Platform(other.to_string()),
    }
}

pub fn to_markup(keyboard: InlineKeyboard) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|b| InlineKeyboardButton::callback(b.label, b.callback_data))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef, DeliveryError> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), html.to_string())
            .parse_mode(ParseMode::Html)
            .await
            .map_err(classify_error)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<(), DeliveryError> {
        self.bot
            .edit_message_text(
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
                html.to_string(),
            )
            .parse_mode(ParseMode::Html)
            .await
            .map_err(classify_error)?;
        Ok(())
    }

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef, DeliveryError> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), html.to_string())
            .parse_mode(ParseMode::Html)
            .reply_markup(to_markup(keyboard))
            .await
            .map_err(classify_error)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn answer_callback_query(&self, callback_id: &str) -> Result<(), DeliveryError> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map_err(classify_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacebot_core::interactions::start_keyboard;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn classifies_unreachable_recipients() {
        assert_eq!(
            classify_error(RequestError::Api(ApiError::BotBlocked)),
            DeliveryError::Blocked
        );
        assert_eq!(
            classify_error(RequestError::Api(ApiError::ChatNotFound)),
            DeliveryError::RecipientGone
        );
        assert_eq!(
            classify_error(RequestError::Api(ApiError::UserDeactivated)),
            DeliveryError::RecipientGone
        );
    }

    #[test]
    fn other_api_errors_are_platform_failures() {
        let err = classify_error(RequestError::Api(ApiError::MessageNotModified));
        assert!(matches!(err, DeliveryError::Platform(_)));
    }

    #[test]
    fn start_keyboard_maps_to_one_row_of_callback_buttons() {
        let markup = to_markup(start_keyboard());
        assert_eq!(markup.inline_keyboard.len(), 1);

        let data: Vec<String> = markup.inline_keyboard[0]
            .iter()
            .map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(d) => d.clone(),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect();
        assert_eq!(data, vec!["news", "about"]);
    }
}
