use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::{DeliveryError, InlineKeyboard},
};

/// Outbound messaging port.
///
/// Every call reports a typed [`DeliveryError`] so callers can tell an
/// unreachable recipient apart from a transient platform failure.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_html(&self, chat_id: ChatId, html: &str) -> Result<MessageRef, DeliveryError>;
    async fn edit_html(&self, msg: MessageRef, html: &str) -> Result<(), DeliveryError>;

    async fn send_inline_keyboard(
        &self,
        chat_id: ChatId,
        html: &str,
        keyboard: InlineKeyboard,
    ) -> Result<MessageRef, DeliveryError>;

    async fn answer_callback_query(&self, callback_id: &str) -> Result<(), DeliveryError>;
}
